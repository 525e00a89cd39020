use super::Variant;
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter, Record};
use crate::model::{
    CustomAttributeDefinitionData, CustomAttributeKind, CustomAttributeValue,
    CustomAttributeValueData, ObjectType, SelectionOption,
};
use crate::nested::NestedUnion;
use crate::shape::{
    DefaultValue, FieldKind, FieldShape, Shape, BOOL, DECIMAL, FALSE, INT, NO_ITEMS, STRING,
    STRINGS,
};

const MAX_KEY_LEN: usize = 60;

const STRING_CONFIG: Shape = Shape::new(
    "string_config",
    &[FieldShape::defaulted("enforce_uniqueness", BOOL, FALSE)],
);

const NUMBER_CONFIG: Shape = Shape::new(
    "number_config",
    &[FieldShape::defaulted("precision", INT, DefaultValue::Int(5))],
);

const SELECTION_CONFIG: Shape = Shape::new(
    "selection_config",
    &[
        FieldShape::defaulted("max_allowed_selections", INT, DefaultValue::Int(1)),
        FieldShape::defaulted(
            "allowed_selections",
            FieldKind::BlockList(SelectionOption::SHAPE),
            NO_ITEMS,
        ),
    ],
);

impl Variant for CustomAttributeDefinitionData {
    const TYPE: ObjectType = ObjectType::CustomAttributeDefinition;
    const SHAPE: &'static Shape = &Shape::new(
        "custom_attribute_definition_data",
        &[
            FieldShape::required("name", STRING),
            FieldShape::required("type", STRING),
            FieldShape::payload("string_config", FieldKind::Block(&STRING_CONFIG)),
            FieldShape::payload("number_config", FieldKind::Block(&NUMBER_CONFIG)),
            FieldShape::payload("selection_config", FieldKind::Block(&SELECTION_CONFIG)),
            FieldShape::optional("description", STRING),
            FieldShape::optional("key", STRING),
            FieldShape::optional("app_visibility", STRING),
            FieldShape::optional("seller_visibility", STRING),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let key = r.opt_string("key")?;
        if let Some(k) = &key {
            check_key(r, k)?;
        }
        Ok(CustomAttributeDefinitionData {
            name: r.string("name")?,
            kind: CustomAttributeKind::decode(r)?,
            description: r.opt_string("description")?,
            key,
            app_visibility: r.opt_enumerated("app_visibility")?,
            seller_visibility: r.opt_enumerated("seller_visibility")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        self.kind.encode(w);
        w.opt_string("description", self.description.as_deref());
        w.opt_string("key", self.key.as_deref());
        w.opt_enumerated("app_visibility", self.app_visibility);
        w.opt_enumerated("seller_visibility", self.seller_visibility);
    }

    wraps!(CustomAttributeDefinition);
}

/// Keys are `[namespace:]name`, each part drawn from `[A-Za-z0-9._-]`.
fn check_key(r: &FieldReader<'_>, key: &str) -> Result<(), CodecError> {
    let name = key.rsplit_once(':').map_or(key, |(_, name)| name);
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ':');
    if name.is_empty() || name.len() > MAX_KEY_LEN || !key.chars().all(allowed) {
        return Err(CodecError::InvalidValue {
            field: r.path_of("key"),
            value: key.to_string(),
            reason: format!(
                "expected up to {} characters from [A-Za-z0-9._-] with an optional namespace",
                MAX_KEY_LEN
            ),
        });
    }
    Ok(())
}

impl Variant for CustomAttributeValueData {
    const TYPE: ObjectType = ObjectType::CustomAttributeValue;
    const SHAPE: &'static Shape = &Shape::new(
        "custom_attribute_value_data",
        &[
            FieldShape::required("custom_attribute_definition_id", STRING),
            FieldShape::required("key", STRING),
            FieldShape::optional("name", STRING),
            FieldShape::payload("boolean_value", BOOL),
            FieldShape::payload("string_value", STRING),
            FieldShape::payload("number_value", DECIMAL),
            FieldShape::payload("selection_uid_values", STRINGS),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(CustomAttributeValueData {
            custom_attribute_definition_id: r.string("custom_attribute_definition_id")?,
            key: r.string("key")?,
            name: r.opt_string("name")?,
            value: CustomAttributeValue::decode(r)?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("custom_attribute_definition_id", &self.custom_attribute_definition_id);
        w.string("key", &self.key);
        w.opt_string("name", self.name.as_deref());
        self.value.encode(w);
    }

    wraps!(CustomAttributeValue);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranscoderConfig;
    use crate::model::{AppVisibility, SellerVisibility};
    use crate::value::{from_json, to_json};
    use serde_json::json;

    fn decode<V: Variant>(input: serde_json::Value) -> Result<V, CodecError> {
        let config = TranscoderConfig::default();
        let map = from_json(&input).unwrap();
        V::decode(&FieldReader::new(V::SHAPE, &map, V::TYPE.data_key(), &config))
    }

    fn encode<V: Variant>(data: &V) -> serde_json::Value {
        let config = TranscoderConfig::default();
        let mut w = FieldWriter::new(V::SHAPE, V::TYPE.data_key(), &config);
        data.encode(&mut w);
        to_json(&w.finish().unwrap())
    }

    #[test]
    fn test_definition_round_trip() {
        let input = json!({
            "name": "Roast",
            "type": "STRING",
            "string_config": {"enforce_uniqueness": true},
            "key": "coffee:roast",
            "app_visibility": "APP_VISIBILITY_READ_ONLY",
            "seller_visibility": "SELLER_VISIBILITY_READ_WRITE_VALUES"
        });
        let def: CustomAttributeDefinitionData = decode(input.clone()).unwrap();
        assert_eq!(
            def.kind,
            CustomAttributeKind::String {
                enforce_uniqueness: true
            }
        );
        assert_eq!(def.app_visibility, Some(AppVisibility::ReadOnly));
        assert_eq!(def.seller_visibility, Some(SellerVisibility::ReadWriteValues));
        assert_eq!(def.description, None);
        assert_eq!(encode(&def), input);
    }

    #[test]
    fn test_definition_bad_key() {
        let err = decode::<CustomAttributeDefinitionData>(json!({
            "name": "Roast",
            "type": "BOOLEAN",
            "key": "has space"
        }))
        .unwrap_err();
        assert_eq!(err.field(), Some("custom_attribute_definition_data.key"));
    }

    #[test]
    fn test_definition_unknown_visibility() {
        let err = decode::<CustomAttributeDefinitionData>(json!({
            "name": "Roast",
            "type": "BOOLEAN",
            "app_visibility": "PUBLIC"
        }))
        .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_value_number() {
        let input = json!({
            "custom_attribute_definition_id": "CAD1",
            "key": "weight",
            "number_value": "12.50"
        });
        let value: CustomAttributeValueData = decode(input.clone()).unwrap();
        assert_eq!(value.value, CustomAttributeValue::Number("12.50".into()));
        assert_eq!(encode(&value), input);
    }

    #[test]
    fn test_value_requires_payload() {
        match decode::<CustomAttributeValueData>(json!({
            "custom_attribute_definition_id": "CAD1",
            "key": "weight"
        })) {
            Err(CodecError::InvalidUnionState { union, .. }) => {
                assert_eq!(union, "custom attribute value")
            }
            other => panic!("expected InvalidUnionState, got {:?}", other),
        }
    }
}
