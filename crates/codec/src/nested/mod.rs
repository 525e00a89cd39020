//! Codecs for the tagged unions embedded inside a variant's data block.
//!
//! Every union resolves to exactly one member in a single step, either from
//! an explicit discriminator field or by checking which payload fields are
//! present, and its discriminator and payload are always read and written
//! together. A union never owns a block of its own: it decodes from the
//! parent's [`FieldReader`] and encodes into the parent's [`FieldWriter`],
//! so its fields are declared in the parent's shape.

mod attribute;
mod discount;
mod inventory;
mod measurement;
mod pricing;
mod product_set;

use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter};

pub use measurement::CUSTOM_UNIT_SHAPE;

pub trait NestedUnion: Sized {
    /// Name used in error messages, e.g. `"discount strategy"`.
    const NAME: &'static str;

    fn decode(reader: &FieldReader<'_>) -> Result<Self, CodecError>;
    fn encode(&self, writer: &mut FieldWriter<'_>);
}

/// Reject a payload field that belongs to a member other than `variant`.
pub(crate) fn forbid(
    r: &FieldReader<'_>,
    union: &'static str,
    variant: &str,
    field: &str,
) -> Result<(), CodecError> {
    if r.contains(field) {
        return Err(CodecError::InvalidUnionState {
            union,
            variant: variant.to_string(),
            field: r.path_of(field),
            reason: "belongs to a different member",
        });
    }
    Ok(())
}

pub(crate) fn payload_missing(
    r: &FieldReader<'_>,
    union: &'static str,
    variant: &str,
    field: &str,
) -> CodecError {
    CodecError::InvalidUnionState {
        union,
        variant: variant.to_string(),
        field: r.path_of(field),
        reason: "is required",
    }
}
