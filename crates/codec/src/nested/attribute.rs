use tracing::warn;

use super::{forbid, payload_missing, NestedUnion};
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter, Record};
use crate::model::{
    CustomAttributeKind, CustomAttributeType, CustomAttributeValue, Enumerated, SelectionOption,
};
use crate::shape::{FieldShape, Shape, STRING};

const CONFIG_FIELDS: [(CustomAttributeType, &str); 3] = [
    (CustomAttributeType::String, "string_config"),
    (CustomAttributeType::Number, "number_config"),
    (CustomAttributeType::Selection, "selection_config"),
];

const MAX_NUMBER_PRECISION: i64 = 5;

impl NestedUnion for CustomAttributeKind {
    const NAME: &'static str = "custom attribute definition";

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let attribute_type: CustomAttributeType = r.discriminator("type")?;
        let variant = attribute_type.name();
        for (_, field) in CONFIG_FIELDS.iter().filter(|(t, _)| *t != attribute_type) {
            forbid(r, Self::NAME, variant, field)?;
        }

        match attribute_type {
            CustomAttributeType::Boolean => Ok(CustomAttributeKind::Boolean),
            CustomAttributeType::String => {
                let c = config_block(r, variant, "string_config")?;
                Ok(CustomAttributeKind::String {
                    enforce_uniqueness: c.bool("enforce_uniqueness")?,
                })
            }
            CustomAttributeType::Number => {
                let c = config_block(r, variant, "number_config")?;
                let precision = c.int("precision")?;
                if !(0..=MAX_NUMBER_PRECISION).contains(&precision) {
                    return Err(CodecError::InvalidValue {
                        field: c.path_of("precision"),
                        value: precision.to_string(),
                        reason: format!("must be between 0 and {}", MAX_NUMBER_PRECISION),
                    });
                }
                Ok(CustomAttributeKind::Number { precision })
            }
            CustomAttributeType::Selection => {
                let c = config_block(r, variant, "selection_config")?;
                Ok(CustomAttributeKind::Selection {
                    max_allowed_selections: c.int("max_allowed_selections")?,
                    allowed_selections: c.records("allowed_selections")?,
                })
            }
        }
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.enumerated("type", self.attribute_type());
        match self {
            CustomAttributeKind::Boolean => {}
            CustomAttributeKind::String { enforce_uniqueness } => w.block("string_config", |b| {
                b.bool("enforce_uniqueness", *enforce_uniqueness);
            }),
            CustomAttributeKind::Number { precision } => w.block("number_config", |b| {
                b.int("precision", *precision);
            }),
            CustomAttributeKind::Selection {
                max_allowed_selections,
                allowed_selections,
            } => w.block("selection_config", |b| {
                b.int("max_allowed_selections", *max_allowed_selections);
                b.records("allowed_selections", allowed_selections);
            }),
        }
    }
}

fn config_block<'a>(
    r: &FieldReader<'a>,
    variant: &str,
    field: &str,
) -> Result<FieldReader<'a>, CodecError> {
    r.opt_block(field)?
        .ok_or_else(|| payload_missing(r, CustomAttributeKind::NAME, variant, field))
}

impl Record for SelectionOption {
    const SHAPE: &'static Shape = &Shape::new(
        "allowed_selection",
        &[
            FieldShape::required("name", STRING),
            FieldShape::optional("uid", STRING),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(SelectionOption {
            name: r.string("name")?,
            uid: r.opt_string("uid")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        w.opt_string("uid", self.uid.as_deref());
    }
}

impl CustomAttributeValue {
    pub fn field_name(&self) -> &'static str {
        match self {
            CustomAttributeValue::Boolean(_) => "boolean_value",
            CustomAttributeValue::String(_) => "string_value",
            CustomAttributeValue::Number(_) => "number_value",
            CustomAttributeValue::Selection(_) => "selection_uid_values",
        }
    }
}

impl NestedUnion for CustomAttributeValue {
    const NAME: &'static str = "custom attribute value";

    /// Checks `boolean_value`, `string_value`, `number_value`, then
    /// `selection_uid_values`; the first one present wins.
    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let candidates = [
            r.opt_bool("boolean_value")?.map(CustomAttributeValue::Boolean),
            r.opt_string("string_value")?.map(CustomAttributeValue::String),
            r.opt_decimal("number_value")?.map(CustomAttributeValue::Number),
            r.opt_strings("selection_uid_values")?
                .map(CustomAttributeValue::Selection),
        ];
        let mut present = candidates.into_iter().flatten();
        let value = present
            .next()
            .ok_or_else(|| payload_missing(r, Self::NAME, "unresolved", "boolean_value"))?;

        let ignored: Vec<&str> = present.map(|v| v.field_name()).collect();
        if !ignored.is_empty() {
            warn!(
                field = %r.path_of(value.field_name()),
                ?ignored,
                "custom attribute value populates more than one payload; lower-priority fields ignored"
            );
        }
        Ok(value)
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        let field = self.field_name();
        match self {
            CustomAttributeValue::Boolean(b) => w.bool(field, *b),
            CustomAttributeValue::String(s) => w.string(field, s),
            CustomAttributeValue::Number(n) => w.decimal(field, n),
            CustomAttributeValue::Selection(uids) => w.strings(field, uids),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranscoderConfig;
    use crate::shape::{DefaultValue, FieldKind, BOOL, DECIMAL, FALSE, INT, NO_ITEMS, STRINGS};
    use crate::value::{from_json, to_json};
    use serde_json::json;

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

    const DEFINITION: Shape = Shape::new(
        "custom_attribute_definition_data",
        &[
            FieldShape::required("type", STRING),
            FieldShape::payload(
                "string_config",
                FieldKind::Block(&Shape::new(
                    "string_config",
                    &[FieldShape::defaulted("enforce_uniqueness", BOOL, FALSE)],
                )),
            ),
            FieldShape::payload(
                "number_config",
                FieldKind::Block(&Shape::new(
                    "number_config",
                    &[FieldShape::defaulted("precision", INT, DefaultValue::Int(5))],
                )),
            ),
            FieldShape::payload("selection_config", FieldKind::Block(&SELECTION_CONFIG)),
        ],
    );

    const VALUE: Shape = Shape::new(
        "custom_attribute_value_data",
        &[
            FieldShape::payload("boolean_value", BOOL),
            FieldShape::payload("string_value", STRING),
            FieldShape::payload("number_value", DECIMAL),
            FieldShape::payload("selection_uid_values", STRINGS),
        ],
    );

    fn definition(input: serde_json::Value) -> Result<CustomAttributeKind, CodecError> {
        let config = TranscoderConfig::default();
        let map = from_json(&input).unwrap();
        CustomAttributeKind::decode(&FieldReader::new(
            &DEFINITION,
            &map,
            "custom_attribute_definition_data",
            &config,
        ))
    }

    fn value(input: serde_json::Value) -> Result<CustomAttributeValue, CodecError> {
        let config = TranscoderConfig::default();
        let map = from_json(&input).unwrap();
        CustomAttributeValue::decode(&FieldReader::new(
            &VALUE,
            &map,
            "custom_attribute_value_data",
            &config,
        ))
    }

    #[test]
    fn test_number_config_default_precision() {
        let kind = definition(json!({"type": "NUMBER", "number_config": {}})).unwrap();
        assert_eq!(kind, CustomAttributeKind::Number { precision: 5 });
    }

    #[test]
    fn test_selection_config() {
        let input = json!({
            "type": "SELECTION",
            "selection_config": {
                "max_allowed_selections": 2,
                "allowed_selections": [{"name": "Red", "uid": "r1"}, {"name": "Blue"}]
            }
        });
        let kind = definition(input.clone()).unwrap();
        match &kind {
            CustomAttributeKind::Selection {
                max_allowed_selections,
                allowed_selections,
            } => {
                assert_eq!(*max_allowed_selections, 2);
                assert_eq!(allowed_selections[1].uid, None);
            }
            other => panic!("expected Selection, got {:?}", other),
        }
        let config = TranscoderConfig::default();
        let mut w = FieldWriter::new(&DEFINITION, "custom_attribute_definition_data", &config);
        kind.encode(&mut w);
        assert_eq!(to_json(&w.finish().unwrap()), input);
    }

    #[test]
    fn test_missing_config_block() {
        match definition(json!({"type": "STRING"})) {
            Err(CodecError::InvalidUnionState { field, .. }) => {
                assert_eq!(field, "custom_attribute_definition_data.string_config")
            }
            other => panic!("expected InvalidUnionState, got {:?}", other),
        }
    }

    #[test]
    fn test_boolean_with_config_is_invalid() {
        let err = definition(json!({"type": "BOOLEAN", "number_config": {}})).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidUnionState);
    }

    #[test]
    fn test_precision_out_of_range() {
        let err = definition(json!({"type": "NUMBER", "number_config": {"precision": 9}})).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_value_priority_order() {
        let all = json!({
            "selection_uid_values": ["u1"],
            "number_value": "1.5",
            "string_value": "s",
            "boolean_value": false
        });
        assert_eq!(value(all).unwrap(), CustomAttributeValue::Boolean(false));
        assert_eq!(
            value(json!({"number_value": "1.5", "string_value": "s"})).unwrap(),
            CustomAttributeValue::String("s".into())
        );
        assert_eq!(
            value(json!({"selection_uid_values": ["u1"], "number_value": "1.5"})).unwrap(),
            CustomAttributeValue::Number("1.5".into())
        );
        assert_eq!(
            value(json!({"selection_uid_values": ["u1"]})).unwrap(),
            CustomAttributeValue::Selection(vec!["u1".into()])
        );
    }

    #[test]
    fn test_value_none_present() {
        let err = value(json!({})).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidUnionState);
    }
}
