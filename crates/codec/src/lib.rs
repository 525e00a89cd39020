//! shelf-codec: transcoding between flat configuration maps and typed
//! catalog objects.
//!
//! A catalog object arrives as an ordered [`ConfigMap`] whose `type` tag
//! selects one of eighteen variants. [`decode_entity`] resolves the tag
//! through the [`registry`], decodes the variant's data block and any
//! tagged unions nested inside it, and validates the envelope fields.
//! [`encode_entity`] is the inverse. The [`flat`] forms read and write a
//! single object type through a smaller set of fields; every form implements
//! [`Representation`]. Nothing here performs I/O or keeps state between
//! calls; the store boundary lives in `shelf-store`.

pub mod config;
mod error;
mod fields;
pub mod flat;
pub mod model;
mod nested;
mod records;
pub mod registry;
mod representation;
mod shape;
mod transcoder;
mod value;
mod variants;

pub use config::{ConfigError, QuantityPresence, TranscoderConfig};
pub use error::{CodecError, ErrorKind};
pub use fields::{FieldReader, FieldWriter, Record};
pub use flat::{FlatDiscount, FlatItem};
pub use model::*;
pub use nested::{NestedUnion, CUSTOM_UNIT_SHAPE};
pub use registry::{codec_for, lookup, VariantCodec};
pub use representation::{Entity, Representation};
pub use shape::{DefaultValue, FieldKind, FieldShape, Presence, Shape};
pub use transcoder::{
    decode_entity, encode_entity, encode_persisted_entity, ensure_assigned, temporary_id,
    ENTITY_SHAPE,
};
pub use value::{from_json, to_json, ConfigMap, ConfigValue, NestedFields};
pub use variants::Variant;
