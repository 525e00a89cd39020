use std::collections::HashSet;

use super::Variant;
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter, Record};
use crate::model::{
    InventoryAlert, ItemOptionValueRef, ItemVariationData, LocationOverride, Money, ObjectType,
    VariationPricing,
};
use crate::nested::NestedUnion;
use crate::shape::{
    DefaultValue, FieldKind, FieldShape, Shape, BOOL, EMPTY, FALSE, INT, NO_ITEMS, STRING, STRINGS,
    ZERO,
};

const NO_ALERT: DefaultValue = DefaultValue::Str("NONE");

impl Variant for ItemVariationData {
    const TYPE: ObjectType = ObjectType::ItemVariation;
    const SHAPE: &'static Shape = &Shape::new(
        "item_variation_data",
        &[
            FieldShape::required("item_id", STRING),
            FieldShape::required("name", STRING),
            FieldShape::required("pricing_type", STRING),
            FieldShape::payload("price_money", FieldKind::Block(Money::SHAPE)),
            FieldShape::defaulted("sku", STRING, EMPTY),
            FieldShape::defaulted("upc", STRING, EMPTY),
            FieldShape::defaulted("user_data", STRING, EMPTY),
            FieldShape::defaulted("measurement_unit_id", STRING, EMPTY),
            FieldShape::defaulted("ordinal", INT, ZERO),
            FieldShape::defaulted("service_duration", INT, ZERO),
            FieldShape::defaulted("track_inventory", BOOL, FALSE),
            FieldShape::defaulted("available_for_booking", BOOL, FALSE),
            FieldShape::defaulted("inventory_alert_type", STRING, NO_ALERT),
            FieldShape::payload("inventory_alert_threshold", INT),
            FieldShape::defaulted("team_member_ids", STRINGS, NO_ITEMS),
            FieldShape::defaulted(
                "item_option_values",
                FieldKind::BlockList(ItemOptionValueRef::SHAPE),
                NO_ITEMS,
            ),
            FieldShape::defaulted(
                "location_overrides",
                FieldKind::BlockList(LocationOverride::SHAPE),
                NO_ITEMS,
            ),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let location_overrides: Vec<LocationOverride> = r.records("location_overrides")?;
        let mut seen = HashSet::new();
        for (i, o) in location_overrides.iter().enumerate() {
            if !seen.insert(o.location_id.as_str()) {
                return Err(CodecError::InvalidValue {
                    field: format!("{}[{}].location_id", r.path_of("location_overrides"), i),
                    value: o.location_id.clone(),
                    reason: "location already has an override".to_string(),
                });
            }
        }

        Ok(ItemVariationData {
            item_id: r.string("item_id")?,
            name: r.string("name")?,
            pricing: VariationPricing::decode(r)?,
            sku: r.string("sku")?,
            upc: r.string("upc")?,
            user_data: r.string("user_data")?,
            measurement_unit_id: r.string("measurement_unit_id")?,
            ordinal: r.int("ordinal")?,
            service_duration: r.int("service_duration")?,
            track_inventory: r.bool("track_inventory")?,
            available_for_booking: r.bool("available_for_booking")?,
            inventory_alert: InventoryAlert::decode(r)?,
            team_member_ids: r.strings("team_member_ids")?,
            item_option_values: r.records("item_option_values")?,
            location_overrides,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("item_id", &self.item_id);
        w.string("name", &self.name);
        self.pricing.encode(w);
        w.string("sku", &self.sku);
        w.string("upc", &self.upc);
        w.string("user_data", &self.user_data);
        w.string("measurement_unit_id", &self.measurement_unit_id);
        w.int("ordinal", self.ordinal);
        w.int("service_duration", self.service_duration);
        w.bool("track_inventory", self.track_inventory);
        w.bool("available_for_booking", self.available_for_booking);
        self.inventory_alert.encode(w);
        w.strings("team_member_ids", &self.team_member_ids);
        w.records("item_option_values", &self.item_option_values);
        w.records("location_overrides", &self.location_overrides);
    }

    wraps!(ItemVariation);
}

impl Record for ItemOptionValueRef {
    const SHAPE: &'static Shape = &Shape::new(
        "item_option_value",
        &[
            FieldShape::required("item_option_id", STRING),
            FieldShape::required("item_option_value_id", STRING),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(ItemOptionValueRef {
            item_option_id: r.string("item_option_id")?,
            item_option_value_id: r.string("item_option_value_id")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("item_option_id", &self.item_option_id);
        w.string("item_option_value_id", &self.item_option_value_id);
    }
}

impl Record for LocationOverride {
    const SHAPE: &'static Shape = &Shape::new(
        "location_override",
        &[
            FieldShape::required("location_id", STRING),
            FieldShape::required("pricing_type", STRING),
            FieldShape::payload("price_money", FieldKind::Block(Money::SHAPE)),
            FieldShape::defaulted("track_inventory", BOOL, FALSE),
            FieldShape::defaulted("inventory_alert_type", STRING, NO_ALERT),
            FieldShape::payload("inventory_alert_threshold", INT),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(LocationOverride {
            location_id: r.string("location_id")?,
            pricing: VariationPricing::decode(r)?,
            track_inventory: r.bool("track_inventory")?,
            inventory_alert: InventoryAlert::decode(r)?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("location_id", &self.location_id);
        self.pricing.encode(w);
        w.bool("track_inventory", self.track_inventory);
        self.inventory_alert.encode(w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranscoderConfig;
    use crate::value::{from_json, to_json};
    use serde_json::json;

    fn decode(input: serde_json::Value) -> Result<ItemVariationData, CodecError> {
        let config = TranscoderConfig::default();
        let map = from_json(&input).unwrap();
        ItemVariationData::decode(&FieldReader::new(
            ItemVariationData::SHAPE,
            &map,
            "item_variation_data",
            &config,
        ))
    }

    fn encode(data: &ItemVariationData) -> serde_json::Value {
        let config = TranscoderConfig::default();
        let mut w = FieldWriter::new(ItemVariationData::SHAPE, "item_variation_data", &config);
        data.encode(&mut w);
        to_json(&w.finish().unwrap())
    }

    #[test]
    fn test_variable_pricing_without_price() {
        let v = decode(json!({
            "item_id": "I1",
            "name": "Small",
            "pricing_type": "VARIABLE_PRICING"
        }))
        .unwrap();
        assert_eq!(v.pricing, VariationPricing::Variable(None));
        assert_eq!(v.inventory_alert, InventoryAlert::None { threshold: None });
        let out = encode(&v);
        assert!(out.get("price_money").is_none());
        assert_eq!(out["inventory_alert_type"], json!("NONE"));
        assert_eq!(out["service_duration"], json!(0));
    }

    #[test]
    fn test_fixed_pricing_requires_price() {
        let err = decode(json!({
            "item_id": "I1",
            "name": "Small",
            "pricing_type": "FIXED_PRICING"
        }))
        .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::MissingRequiredField);
        assert_eq!(err.field(), Some("item_variation_data.price_money"));
    }

    #[test]
    fn test_location_overrides() {
        let input = json!({
            "item_id": "I1",
            "name": "Small",
            "pricing_type": "FIXED_PRICING",
            "price_money": {"amount": 350, "currency": "USD"},
            "location_overrides": [{
                "location_id": "L1",
                "pricing_type": "FIXED_PRICING",
                "price_money": {"amount": 400, "currency": "USD"},
                "inventory_alert_type": "LOW_QUANTITY",
                "inventory_alert_threshold": 2
            }]
        });
        let v = decode(input).unwrap();
        let o = &v.location_overrides[0];
        assert_eq!(o.pricing, VariationPricing::Fixed(Money::new(400, "USD")));
        assert_eq!(o.inventory_alert, InventoryAlert::LowQuantity { threshold: 2 });
        assert_eq!(
            encode(&v)["location_overrides"][0],
            json!({
                "location_id": "L1",
                "pricing_type": "FIXED_PRICING",
                "price_money": {"amount": 400, "currency": "USD"},
                "track_inventory": false,
                "inventory_alert_type": "LOW_QUANTITY",
                "inventory_alert_threshold": 2
            })
        );
    }

    #[test]
    fn test_duplicate_location_override() {
        let err = decode(json!({
            "item_id": "I1",
            "name": "Small",
            "pricing_type": "VARIABLE_PRICING",
            "location_overrides": [
                {"location_id": "L1", "pricing_type": "VARIABLE_PRICING"},
                {"location_id": "L1", "pricing_type": "VARIABLE_PRICING"}
            ]
        }))
        .unwrap_err();
        assert_eq!(
            err.field(),
            Some("item_variation_data.location_overrides[1].location_id")
        );
    }

    #[test]
    fn test_override_alert_without_threshold() {
        let err = decode(json!({
            "item_id": "I1",
            "name": "Small",
            "pricing_type": "VARIABLE_PRICING",
            "location_overrides": [{
                "location_id": "L1",
                "pricing_type": "VARIABLE_PRICING",
                "inventory_alert_type": "LOW_QUANTITY"
            }]
        }))
        .unwrap_err();
        match err {
            CodecError::InvalidUnionState { field, .. } => assert_eq!(
                field,
                "item_variation_data.location_overrides[0].inventory_alert_threshold"
            ),
            other => panic!("expected InvalidUnionState, got {:?}", other),
        }
    }
}
