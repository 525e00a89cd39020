//! The configuration forms a catalog object can be read from and written to.
//!
//! [`Entity`] is the full tagged form handled by [`decode_entity`] and
//! [`encode_entity`]. The flat forms in [`crate::flat`] cover a single
//! object type with a smaller set of fields and map onto the same
//! [`CatalogObject`], so a store never sees which form a caller used.

use crate::config::TranscoderConfig;
use crate::error::CodecError;
use crate::model::{CatalogObject, Enumerated, ObjectType};
use crate::transcoder::{decode_entity, encode_entity, ensure_assigned};
use crate::value::ConfigMap;

pub trait Representation {
    /// Name used in logs, e.g. `"catalog_item"`.
    const NAME: &'static str;

    /// Whether objects of `object_type` can be written in this form.
    fn accepts(object_type: ObjectType) -> bool;

    fn decode(raw: &ConfigMap, config: &TranscoderConfig) -> Result<CatalogObject, CodecError>;

    fn encode(object: &CatalogObject, config: &TranscoderConfig) -> Result<ConfigMap, CodecError>;

    /// [`Representation::encode`] for an object that came back from the
    /// store: every identifier in it must have been assigned.
    fn encode_persisted(
        object: &CatalogObject,
        config: &TranscoderConfig,
    ) -> Result<ConfigMap, CodecError> {
        ensure_assigned(object, config)?;
        Self::encode(object, config)
    }
}

/// The full tagged form: a `type`, the envelope fields and one data block.
#[derive(Debug, Clone, Copy, Default)]
pub struct Entity;

impl Representation for Entity {
    const NAME: &'static str = "catalog_object";

    fn accepts(_: ObjectType) -> bool {
        true
    }

    fn decode(raw: &ConfigMap, config: &TranscoderConfig) -> Result<CatalogObject, CodecError> {
        decode_entity(raw, config)
    }

    fn encode(object: &CatalogObject, config: &TranscoderConfig) -> Result<ConfigMap, CodecError> {
        encode_entity(object, config)
    }
}

/// The error for an `object` handed to a form that only holds `expected`.
pub(crate) fn wrong_type(expected: ObjectType, object: &CatalogObject) -> CodecError {
    CodecError::WrongObjectType {
        expected: expected.name(),
        found: object.object_type().name(),
    }
}
