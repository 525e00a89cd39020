//! Per-variant codecs.
//!
//! Each top-level object type implements [`Variant`]: a static shape
//! descriptor for its data block plus decode and encode functions that read
//! and write through that shape. The registry turns every implementation
//! into a [`crate::registry::VariantCodec`] at compile time.

use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter};
use crate::model::{CatalogObjectData, ObjectType};
use crate::shape::Shape;

pub trait Variant: Sized + 'static {
    const TYPE: ObjectType;
    /// Shape of the data block, e.g. everything under `item_data`.
    const SHAPE: &'static Shape;

    fn decode(reader: &FieldReader<'_>) -> Result<Self, CodecError>;
    fn encode(&self, writer: &mut FieldWriter<'_>);

    fn into_data(self) -> CatalogObjectData;
    fn from_data(data: &CatalogObjectData) -> Option<&Self>;
}

/// Implements the `CatalogObjectData` conversions of [`Variant`].
macro_rules! wraps {
    ($member:ident) => {
        fn into_data(self) -> $crate::model::CatalogObjectData {
            $crate::model::CatalogObjectData::$member(self)
        }

        fn from_data(data: &$crate::model::CatalogObjectData) -> Option<&Self> {
            match data {
                $crate::model::CatalogObjectData::$member(v) => Some(v),
                _ => None,
            }
        }
    };
}

mod attribute;
mod basic;
mod item;
mod modifier;
mod plan;
mod pricing;
mod variation;
