//! Whole-entity decode and encode.
//!
//! [`decode_entity`] reads the envelope fields every catalog object shares,
//! resolves the `type` tag through the registry, and hands the matching data
//! block to that variant's codec. [`encode_entity`] is its inverse. Keys
//! neither the envelope nor the variant recognizes are carried on the
//! [`CatalogObject`] and written back unchanged, at any depth.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::config::TranscoderConfig;
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter, Record};
use crate::model::{CatalogObject, CatalogObjectData, CatalogV1Id, LocationVisibility, ObjectType};
use crate::registry::codec_for;
use crate::shape::{DefaultValue, FieldKind, FieldShape, Shape, BOOL, EMPTY, INT, NO_ITEMS, STRING, STRINGS, ZERO};
use crate::value::{ConfigMap, ConfigValue};

const PRESENT_AT: &str = "present_at_location_ids";
const ABSENT_AT: &str = "absent_at_location_ids";

/// Envelope fields shared by every object type. The data block is not
/// declared here because its key depends on the tag.
pub const ENTITY_SHAPE: Shape = Shape::new(
    "catalog_object",
    &[
        FieldShape::required("type", STRING),
        FieldShape::optional("id", STRING),
        FieldShape::defaulted("version", INT, ZERO),
        FieldShape::defaulted("present_at_all_locations", BOOL, DefaultValue::Bool(true)),
        FieldShape::optional(PRESENT_AT, STRINGS),
        FieldShape::optional(ABSENT_AT, STRINGS),
        FieldShape::defaulted("image_id", STRING, EMPTY),
        FieldShape::defaulted(
            "catalog_v1_ids",
            FieldKind::BlockList(CatalogV1Id::SHAPE),
            NO_ITEMS,
        ),
    ],
);

// ── Decode ──────────────────────────────────────────────────────────

/// Decode one catalog object from its configuration representation.
///
/// An absent or empty `id` is replaced by a fresh temporary identifier.
pub fn decode_entity(
    raw: &ConfigMap,
    config: &TranscoderConfig,
) -> Result<CatalogObject, CodecError> {
    let r = FieldReader::new(&ENTITY_SHAPE, raw, "", config);
    let object_type: ObjectType = r.discriminator("type")?;
    let codec = codec_for(object_type);
    let data_key = codec.data_key();

    let block = match raw.get(data_key) {
        Some(ConfigValue::Map(block)) => block,
        Some(other) => {
            return Err(CodecError::TypeMismatch {
                field: data_key.to_string(),
                expected: "map",
                found: other.kind_name(),
            })
        }
        None => {
            return Err(CodecError::MissingRequiredField {
                field: data_key.to_string(),
            })
        }
    };
    let data_reader = FieldReader::new(codec.shape(), block, data_key, config);
    let data = codec.decode(&data_reader)?;

    let id = id_or_temporary(r.opt_string("id")?.as_deref(), config);

    let mut unknown_fields = r.unknown_fields();
    unknown_fields.shift_remove(data_key);
    let mut unknown_nested_fields = r.nested_unknown_fields();
    unknown_nested_fields.extend(data_reader.nested_unknown_fields());

    let object = CatalogObject {
        id,
        version: r.int("version")?,
        visibility: decode_visibility(&r)?,
        image_id: r.string("image_id")?,
        catalog_v1_ids: r.records("catalog_v1_ids")?,
        data,
        unknown_fields,
        unknown_data_fields: data_reader.unknown_fields(),
        unknown_nested_fields,
    };
    debug!(
        object_type = %object_type,
        id = %object.id,
        unknown = object.unknown_fields.len() + object.unknown_data_fields.len(),
        unknown_nested = object.unknown_nested_fields.len(),
        "decoded catalog object"
    );
    Ok(object)
}

fn decode_visibility(r: &FieldReader<'_>) -> Result<LocationVisibility, CodecError> {
    let everywhere = r.bool("present_at_all_locations")?;
    let present_at = r.opt_strings(PRESENT_AT)?;
    let absent_at = r.opt_strings(ABSENT_AT)?;

    if everywhere {
        let listed = [(PRESENT_AT, &present_at), (ABSENT_AT, &absent_at)]
            .into_iter()
            .find(|(_, list)| list.is_some());
        return match listed {
            Some((field, _)) => Err(CodecError::ConflictingLocations {
                field: r.path_of(field),
                reason: "only allowed when present_at_all_locations is false".to_string(),
            }),
            None => Ok(LocationVisibility::AllLocations),
        };
    }

    if let (Some(present), Some(absent)) = (&present_at, &absent_at) {
        let present: HashSet<&str> = present.iter().map(String::as_str).collect();
        if let Some(both) = absent.iter().find(|id| present.contains(id.as_str())) {
            return Err(CodecError::ConflictingLocations {
                field: r.path_of(ABSENT_AT),
                reason: format!("location '{}' is also listed in {}", both, PRESENT_AT),
            });
        }
    }
    Ok(LocationVisibility::Explicit {
        present_at,
        absent_at,
    })
}

// ── Encode ──────────────────────────────────────────────────────────

/// Encode one catalog object into its configuration representation.
///
/// An object with an empty `id` is written with a fresh temporary
/// identifier.
pub fn encode_entity(
    object: &CatalogObject,
    config: &TranscoderConfig,
) -> Result<ConfigMap, CodecError> {
    let object_type = object.object_type();
    let codec = codec_for(object_type);
    let id = id_or_temporary(Some(&object.id), config);

    let nested = &object.unknown_nested_fields;
    let mut w = FieldWriter::new(&ENTITY_SHAPE, "", config).with_nested_unknown(nested);
    w.enumerated("type", object_type);
    w.string("id", &id);
    w.int("version", object.version);
    match &object.visibility {
        LocationVisibility::AllLocations => w.bool("present_at_all_locations", true),
        LocationVisibility::Explicit {
            present_at,
            absent_at,
        } => {
            w.bool("present_at_all_locations", false);
            w.opt_strings(PRESENT_AT, present_at.as_deref());
            w.opt_strings(ABSENT_AT, absent_at.as_deref());
        }
    }
    w.string("image_id", &object.image_id);
    w.records("catalog_v1_ids", &object.catalog_v1_ids);

    let mut data =
        FieldWriter::new(codec.shape(), codec.data_key(), config).with_nested_unknown(nested);
    codec.encode(&object.data, &mut data)?;
    data.extend_unknown(&object.unknown_data_fields);
    w.insert_raw(codec.data_key(), ConfigValue::Map(data.finish()?));

    w.extend_unknown(&object.unknown_fields);
    let map = w.finish()?;
    debug!(object_type = %object_type, id = %id, "encoded catalog object");
    Ok(map)
}

// ── Identifiers ─────────────────────────────────────────────────────

/// A fresh identifier marked as not yet assigned by the store: the
/// configured prefix followed by a random UUID.
pub fn temporary_id(config: &TranscoderConfig) -> String {
    format!("{}{}", config.temporary_id_prefix, Uuid::new_v4())
}

/// `id` itself, or a fresh temporary identifier when it is absent or empty.
pub(crate) fn id_or_temporary(id: Option<&str>, config: &TranscoderConfig) -> String {
    match id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => temporary_id(config),
    }
}

/// Fail with `IdentifierNotAssigned` if `object`, or a variation embedded
/// in it, still carries a temporary identifier. Called on objects returned
/// by the store.
pub fn ensure_assigned(object: &CatalogObject, config: &TranscoderConfig) -> Result<(), CodecError> {
    let embedded: &[CatalogObject] = match &object.data {
        CatalogObjectData::Item(item) => &item.variations,
        _ => &[],
    };
    match std::iter::once(object)
        .chain(embedded)
        .find(|o| config.is_temporary_id(&o.id))
    {
        Some(unassigned) => Err(CodecError::IdentifierNotAssigned {
            id: unassigned.id.clone(),
        }),
        None => Ok(()),
    }
}

/// [`encode_entity`] for an object that came back from the store.
pub fn encode_persisted_entity(
    object: &CatalogObject,
    config: &TranscoderConfig,
) -> Result<ConfigMap, CodecError> {
    ensure_assigned(object, config)?;
    encode_entity(object, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryData;
    use crate::value::{from_json, to_json};
    use serde_json::json;

    fn decode(input: serde_json::Value) -> Result<CatalogObject, CodecError> {
        decode_entity(&from_json(&input).unwrap(), &TranscoderConfig::default())
    }

    #[test]
    fn test_envelope_defaults() {
        let object = decode(json!({
            "type": "CATEGORY",
            "id": "C1",
            "category_data": {"name": "Drinks"}
        }))
        .unwrap();
        assert_eq!(object.version, 0);
        assert_eq!(object.visibility, LocationVisibility::AllLocations);
        assert_eq!(
            to_json(&encode_entity(&object, &TranscoderConfig::default()).unwrap()),
            json!({
                "type": "CATEGORY",
                "id": "C1",
                "version": 0,
                "present_at_all_locations": true,
                "image_id": "",
                "catalog_v1_ids": [],
                "category_data": {"name": "Drinks"}
            })
        );
    }

    #[test]
    fn test_missing_type() {
        let err = decode(json!({"category_data": {"name": "Drinks"}})).unwrap_err();
        assert_eq!(err, CodecError::MissingRequiredField { field: "type".into() });
    }

    #[test]
    fn test_missing_data_block() {
        let err = decode(json!({"type": "CATEGORY", "image_data": {"name": "x"}})).unwrap_err();
        assert_eq!(
            err,
            CodecError::MissingRequiredField {
                field: "category_data".into()
            }
        );
    }

    #[test]
    fn test_data_block_not_a_map() {
        match decode(json!({"type": "CATEGORY", "category_data": "Drinks"})) {
            Err(CodecError::TypeMismatch { field, found, .. }) => {
                assert_eq!(field, "category_data");
                assert_eq!(found, "string");
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_id_is_temporary() {
        let object = decode(json!({
            "type": "CATEGORY",
            "id": "",
            "category_data": {"name": "Drinks"}
        }))
        .unwrap();
        let uuid = object.id.strip_prefix('#').unwrap();
        assert_eq!(
            Uuid::parse_str(uuid).unwrap().get_version(),
            Some(uuid::Version::Random)
        );
    }

    #[test]
    fn test_visibility_lists() {
        let object = decode(json!({
            "type": "CATEGORY",
            "present_at_all_locations": false,
            "absent_at_location_ids": ["L2"],
            "category_data": {"name": "Drinks"}
        }))
        .unwrap();
        assert_eq!(
            object.visibility,
            LocationVisibility::Explicit {
                present_at: None,
                absent_at: Some(vec!["L2".into()])
            }
        );
        let out = to_json(&encode_entity(&object, &TranscoderConfig::default()).unwrap());
        assert!(out.get(PRESENT_AT).is_none());
        assert_eq!(out[ABSENT_AT], json!(["L2"]));
    }

    #[test]
    fn test_location_in_both_lists() {
        let err = decode(json!({
            "type": "CATEGORY",
            "present_at_all_locations": false,
            "present_at_location_ids": ["L1", "L2"],
            "absent_at_location_ids": ["L2"],
            "category_data": {"name": "Drinks"}
        }))
        .unwrap_err();
        match err {
            CodecError::ConflictingLocations { field, reason } => {
                assert_eq!(field, ABSENT_AT);
                assert!(reason.contains("'L2'"));
            }
            other => panic!("expected ConflictingLocations, got {:?}", other),
        }
    }

    #[test]
    fn test_ensure_assigned() {
        let config = TranscoderConfig::default();
        let data = CatalogObjectData::Category(CategoryData {
            name: "Drinks".into(),
        });
        let fresh = CatalogObject::new("#abc", data.clone());
        assert_eq!(
            ensure_assigned(&fresh, &config),
            Err(CodecError::IdentifierNotAssigned { id: "#abc".into() })
        );
        assert!(encode_persisted_entity(&fresh, &config).is_err());
        let stored = CatalogObject::new("abc123", data);
        assert!(ensure_assigned(&stored, &config).is_ok());
    }

    #[test]
    fn test_encode_assigns_temporary_id() {
        let config = TranscoderConfig::default();
        let object = CatalogObject::new(
            "",
            CatalogObjectData::Category(CategoryData {
                name: "Drinks".into(),
            }),
        );
        let out = encode_entity(&object, &config).unwrap();
        let id = out["id"].as_str().unwrap();
        assert!(config.is_temporary_id(id));
        assert_ne!(id, "");
    }
}
