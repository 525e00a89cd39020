use super::Variant;
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter, Record};
use crate::model::{
    ItemData, ItemOptionData, ItemOptionRef, ItemOptionValueData,
    ModifierListInfo, ModifierOverride, ObjectType,
};
use crate::shape::{
    DefaultValue, FieldKind, FieldShape, Shape, BOOL, EMPTY, FALSE, INT, NO_ITEMS, STRING, STRINGS,
    ZERO,
};

impl Variant for ItemData {
    const TYPE: ObjectType = ObjectType::Item;
    const SHAPE: &'static Shape = &Shape::new(
        "item_data",
        &[
            FieldShape::required("name", STRING),
            FieldShape::defaulted("description", STRING, EMPTY),
            FieldShape::defaulted("abbreviation", STRING, EMPTY),
            FieldShape::defaulted("label_color", STRING, EMPTY),
            FieldShape::defaulted("category_id", STRING, EMPTY),
            FieldShape::defaulted("available_online", BOOL, FALSE),
            FieldShape::defaulted("available_for_pickup", BOOL, FALSE),
            FieldShape::defaulted("available_electronically", BOOL, FALSE),
            FieldShape::defaulted("skip_modifier_screen", BOOL, FALSE),
            FieldShape::defaulted("tax_ids", STRINGS, NO_ITEMS),
            FieldShape::defaulted("product_type", STRING, DefaultValue::Str("REGULAR")),
            FieldShape::defaulted(
                "modifier_list_info",
                FieldKind::BlockList(ModifierListInfo::SHAPE),
                NO_ITEMS,
            ),
            FieldShape::defaulted(
                "item_options",
                FieldKind::BlockList(ItemOptionRef::SHAPE),
                NO_ITEMS,
            ),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(ItemData {
            name: r.string("name")?,
            description: r.string("description")?,
            abbreviation: r.string("abbreviation")?,
            label_color: r.string("label_color")?,
            category_id: r.string("category_id")?,
            available_online: r.bool("available_online")?,
            available_for_pickup: r.bool("available_for_pickup")?,
            available_electronically: r.bool("available_electronically")?,
            skip_modifier_screen: r.bool("skip_modifier_screen")?,
            tax_ids: r.strings("tax_ids")?,
            product_type: r.enumerated("product_type")?,
            modifier_list_info: r.records("modifier_list_info")?,
            item_options: r.records("item_options")?,
            variations: Vec::new(),
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        w.string("description", &self.description);
        w.string("abbreviation", &self.abbreviation);
        w.string("label_color", &self.label_color);
        w.string("category_id", &self.category_id);
        w.bool("available_online", self.available_online);
        w.bool("available_for_pickup", self.available_for_pickup);
        w.bool("available_electronically", self.available_electronically);
        w.bool("skip_modifier_screen", self.skip_modifier_screen);
        w.strings("tax_ids", &self.tax_ids);
        w.enumerated("product_type", self.product_type);
        w.records("modifier_list_info", &self.modifier_list_info);
        w.records("item_options", &self.item_options);
    }

    wraps!(Item);
}

impl Record for ModifierListInfo {
    const SHAPE: &'static Shape = &Shape::new(
        "modifier_list_info",
        &[
            FieldShape::required("modifier_list_id", STRING),
            FieldShape::defaulted(
                "modifier_overrides",
                FieldKind::BlockList(ModifierOverride::SHAPE),
                NO_ITEMS,
            ),
            FieldShape::optional("min_selected_modifiers", INT),
            FieldShape::optional("max_selected_modifiers", INT),
            FieldShape::defaulted("enabled", BOOL, DefaultValue::Bool(true)),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let info = ModifierListInfo {
            modifier_list_id: r.string("modifier_list_id")?,
            modifier_overrides: r.records("modifier_overrides")?,
            min_selected_modifiers: r.opt_int("min_selected_modifiers")?,
            max_selected_modifiers: r.opt_int("max_selected_modifiers")?,
            enabled: r.bool("enabled")?,
        };
        if let (Some(min), Some(max)) = (info.min_selected_modifiers, info.max_selected_modifiers) {
            if max >= 0 && min > max {
                return Err(CodecError::InvalidValue {
                    field: r.path_of("min_selected_modifiers"),
                    value: min.to_string(),
                    reason: format!("exceeds max_selected_modifiers ({})", max),
                });
            }
        }
        Ok(info)
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("modifier_list_id", &self.modifier_list_id);
        w.records("modifier_overrides", &self.modifier_overrides);
        w.opt_int("min_selected_modifiers", self.min_selected_modifiers);
        w.opt_int("max_selected_modifiers", self.max_selected_modifiers);
        w.bool("enabled", self.enabled);
    }
}

impl Record for ModifierOverride {
    const SHAPE: &'static Shape = &Shape::new(
        "modifier_override",
        &[
            FieldShape::required("modifier_id", STRING),
            FieldShape::optional("on_by_default", BOOL),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(ModifierOverride {
            modifier_id: r.string("modifier_id")?,
            on_by_default: r.opt_bool("on_by_default")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("modifier_id", &self.modifier_id);
        w.opt_bool("on_by_default", self.on_by_default);
    }
}

impl Record for ItemOptionRef {
    const SHAPE: &'static Shape = &Shape::new(
        "item_option",
        &[FieldShape::required("item_option_id", STRING)],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(ItemOptionRef {
            item_option_id: r.string("item_option_id")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("item_option_id", &self.item_option_id);
    }
}

impl Variant for ItemOptionData {
    const TYPE: ObjectType = ObjectType::ItemOption;
    const SHAPE: &'static Shape = &Shape::new(
        "item_option_data",
        &[
            FieldShape::required("name", STRING),
            FieldShape::optional("display_name", STRING),
            FieldShape::optional("description", STRING),
            FieldShape::optional("show_colors", BOOL),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(ItemOptionData {
            name: r.string("name")?,
            display_name: r.opt_string("display_name")?,
            description: r.opt_string("description")?,
            show_colors: r.opt_bool("show_colors")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        w.opt_string("display_name", self.display_name.as_deref());
        w.opt_string("description", self.description.as_deref());
        w.opt_bool("show_colors", self.show_colors);
    }

    wraps!(ItemOption);
}

impl Variant for ItemOptionValueData {
    const TYPE: ObjectType = ObjectType::ItemOptionValue;
    const SHAPE: &'static Shape = &Shape::new(
        "item_option_value_data",
        &[
            FieldShape::required("item_option_id", STRING),
            FieldShape::required("name", STRING),
            FieldShape::defaulted("description", STRING, EMPTY),
            FieldShape::defaulted("color", STRING, EMPTY),
            FieldShape::defaulted("ordinal", INT, ZERO),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(ItemOptionValueData {
            item_option_id: r.string("item_option_id")?,
            name: r.string("name")?,
            description: r.string("description")?,
            color: r.string("color")?,
            ordinal: r.int("ordinal")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("item_option_id", &self.item_option_id);
        w.string("name", &self.name);
        w.string("description", &self.description);
        w.string("color", &self.color);
        w.int("ordinal", self.ordinal);
    }

    wraps!(ItemOptionValue);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranscoderConfig;
    use crate::model::ProductType;
    use crate::value::{from_json, to_json};
    use serde_json::json;

    fn decode_item(input: serde_json::Value) -> Result<ItemData, CodecError> {
        let config = TranscoderConfig::default();
        let map = from_json(&input).unwrap();
        ItemData::decode(&FieldReader::new(ItemData::SHAPE, &map, "item_data", &config))
    }

    #[test]
    fn test_item_defaults() {
        let item = decode_item(json!({"name": "Latte"})).unwrap();
        assert_eq!(item.name, "Latte");
        assert_eq!(item.product_type, ProductType::Regular);
        assert!(!item.available_online);
        assert!(item.tax_ids.is_empty());
        assert!(item.modifier_list_info.is_empty());
    }

    #[test]
    fn test_item_requires_name() {
        match decode_item(json!({"description": "no name"})) {
            Err(CodecError::MissingRequiredField { field }) => assert_eq!(field, "item_data.name"),
            other => panic!("expected MissingRequiredField, got {:?}", other),
        }
    }

    #[test]
    fn test_modifier_list_info_round_trip() {
        let input = json!({
            "name": "Latte",
            "modifier_list_info": [{
                "modifier_list_id": "ML1",
                "modifier_overrides": [{"modifier_id": "M1", "on_by_default": true}],
                "max_selected_modifiers": 2,
                "enabled": false
            }]
        });
        let item = decode_item(input).unwrap();
        let info = &item.modifier_list_info[0];
        assert_eq!(info.min_selected_modifiers, None);
        assert_eq!(info.max_selected_modifiers, Some(2));
        assert!(!info.enabled);

        let config = TranscoderConfig::default();
        let mut w = FieldWriter::new(ItemData::SHAPE, "item_data", &config);
        item.encode(&mut w);
        let out = to_json(&w.finish().unwrap());
        assert_eq!(
            out["modifier_list_info"],
            json!([{
                "modifier_list_id": "ML1",
                "modifier_overrides": [{"modifier_id": "M1", "on_by_default": true}],
                "max_selected_modifiers": 2,
                "enabled": false
            }])
        );
        assert_eq!(out["product_type"], json!("REGULAR"));
    }

    #[test]
    fn test_unknown_key_in_modifier_list_info_is_ignored() {
        let item = decode_item(json!({
            "name": "Latte",
            "modifier_list_info": [{"modifier_list_id": "ML1", "hidden_online": true}]
        }))
        .unwrap();
        assert_eq!(item.modifier_list_info[0].modifier_list_id, "ML1");
    }

    #[test]
    fn test_min_exceeds_max() {
        let err = decode_item(json!({
            "name": "Latte",
            "modifier_list_info": [{
                "modifier_list_id": "ML1",
                "min_selected_modifiers": 3,
                "max_selected_modifiers": 1
            }]
        }))
        .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_invalid_product_type() {
        let err = decode_item(json!({"name": "Cut", "product_type": "SERVICE"})).unwrap_err();
        match err {
            CodecError::InvalidValue { field, value, .. } => {
                assert_eq!(field, "item_data.product_type");
                assert_eq!(value, "SERVICE");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }
}
