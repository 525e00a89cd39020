//! Taxes, discounts and the rules that apply them.

use super::Variant;
use crate::error::CodecError;
use crate::fields::{parse_date, FieldReader, FieldWriter, Record};
use crate::model::{
    DiscountData, DiscountStrategy, Money, ObjectType, PricingRuleData, ProductSelector,
    ProductSetData, QuantityRule, TaxData, TimePeriodData,
};
use crate::nested::NestedUnion;
use crate::shape::{
    DefaultValue, FieldKind, FieldShape, Shape, BOOL, DECIMAL, EMPTY, FALSE, INT, NO_ITEMS, STRING,
    STRINGS,
};

impl Variant for TaxData {
    const TYPE: ObjectType = ObjectType::Tax;
    const SHAPE: &'static Shape = &Shape::new(
        "tax_data",
        &[
            FieldShape::required("name", STRING),
            FieldShape::required("calculation_phase", STRING),
            FieldShape::required("inclusion_type", STRING),
            FieldShape::required("percentage", DECIMAL),
            FieldShape::optional("applies_to_custom_amounts", BOOL),
            FieldShape::optional("enabled", BOOL),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(TaxData {
            name: r.string("name")?,
            calculation_phase: r.enumerated("calculation_phase")?,
            inclusion_type: r.enumerated("inclusion_type")?,
            percentage: r.decimal("percentage")?,
            applies_to_custom_amounts: r.opt_bool("applies_to_custom_amounts")?,
            enabled: r.opt_bool("enabled")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        w.enumerated("calculation_phase", self.calculation_phase);
        w.enumerated("inclusion_type", self.inclusion_type);
        w.decimal("percentage", &self.percentage);
        w.opt_bool("applies_to_custom_amounts", self.applies_to_custom_amounts);
        w.opt_bool("enabled", self.enabled);
    }

    wraps!(Tax);
}

impl Variant for DiscountData {
    const TYPE: ObjectType = ObjectType::Discount;
    const SHAPE: &'static Shape = &Shape::new(
        "discount_data",
        &[
            FieldShape::required("name", STRING),
            FieldShape::required("discount_type", STRING),
            FieldShape::payload("percentage", DECIMAL),
            FieldShape::payload("amount_money", FieldKind::Block(Money::SHAPE)),
            FieldShape::defaulted("pin_required", BOOL, FALSE),
            FieldShape::defaulted("label_color", STRING, EMPTY),
            FieldShape::optional("modify_tax_basis", STRING),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(DiscountData {
            name: r.string("name")?,
            strategy: DiscountStrategy::decode(r)?,
            pin_required: r.bool("pin_required")?,
            label_color: r.string("label_color")?,
            modify_tax_basis: r.opt_enumerated("modify_tax_basis")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        self.strategy.encode(w);
        w.bool("pin_required", self.pin_required);
        w.string("label_color", &self.label_color);
        w.opt_enumerated("modify_tax_basis", self.modify_tax_basis);
    }

    wraps!(Discount);
}

impl Variant for PricingRuleData {
    const TYPE: ObjectType = ObjectType::PricingRule;
    const SHAPE: &'static Shape = &Shape::new(
        "pricing_rule_data",
        &[
            FieldShape::required("name", STRING),
            FieldShape::required("discount_id", STRING),
            FieldShape::required("match_products_id", STRING),
            FieldShape::optional("exclude_products_id", STRING),
            FieldShape::defaulted(
                "exclude_strategy",
                STRING,
                DefaultValue::Str("LEAST_EXPENSIVE"),
            ),
            FieldShape::defaulted("time_period_ids", STRINGS, NO_ITEMS),
            FieldShape::optional("valid_from_date", FieldKind::Date),
            FieldShape::optional("valid_until_date", FieldKind::Date),
            FieldShape::optional("valid_from_local_time", FieldKind::LocalTime),
            FieldShape::optional("valid_until_local_time", FieldKind::LocalTime),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let rule = PricingRuleData {
            name: r.string("name")?,
            discount_id: r.string("discount_id")?,
            match_products_id: r.string("match_products_id")?,
            exclude_products_id: r.opt_string("exclude_products_id")?,
            exclude_strategy: r.enumerated("exclude_strategy")?,
            time_period_ids: r.strings("time_period_ids")?,
            valid_from_date: r.opt_date("valid_from_date")?,
            valid_until_date: r.opt_date("valid_until_date")?,
            valid_from_local_time: r.opt_local_time("valid_from_local_time")?,
            valid_until_local_time: r.opt_local_time("valid_until_local_time")?,
        };
        if let (Some(from), Some(until)) = (&rule.valid_from_date, &rule.valid_until_date) {
            let before = match (parse_date(from), parse_date(until)) {
                (Ok(from), Ok(until)) => until < from,
                _ => false,
            };
            if before {
                return Err(CodecError::InvalidValue {
                    field: r.path_of("valid_until_date"),
                    value: until.clone(),
                    reason: format!("is before valid_from_date {}", from),
                });
            }
        }
        Ok(rule)
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        w.string("discount_id", &self.discount_id);
        w.string("match_products_id", &self.match_products_id);
        w.opt_string("exclude_products_id", self.exclude_products_id.as_deref());
        w.enumerated("exclude_strategy", self.exclude_strategy);
        w.strings("time_period_ids", &self.time_period_ids);
        w.opt_date("valid_from_date", self.valid_from_date.as_deref());
        w.opt_date("valid_until_date", self.valid_until_date.as_deref());
        w.opt_local_time("valid_from_local_time", self.valid_from_local_time.as_deref());
        w.opt_local_time("valid_until_local_time", self.valid_until_local_time.as_deref());
    }

    wraps!(PricingRule);
}

impl Variant for ProductSetData {
    const TYPE: ObjectType = ObjectType::ProductSet;
    const SHAPE: &'static Shape = &Shape::new(
        "product_set_data",
        &[
            FieldShape::required("name", STRING),
            FieldShape::defaulted("all_products", BOOL, FALSE),
            FieldShape::payload("product_ids_all", STRINGS),
            FieldShape::payload("product_ids_any", STRINGS),
            FieldShape::payload("quantity_exact", INT),
            FieldShape::payload("quantity_min", INT),
            FieldShape::payload("quantity_max", INT),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(ProductSetData {
            name: r.string("name")?,
            selector: ProductSelector::decode(r)?,
            quantity: QuantityRule::decode(r)?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        self.selector.encode(w);
        self.quantity.encode(w);
    }

    wraps!(ProductSet);
}

impl Variant for TimePeriodData {
    const TYPE: ObjectType = ObjectType::TimePeriod;
    const SHAPE: &'static Shape = &Shape::new(
        "time_period_data",
        &[FieldShape::required("event", STRING)],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let event = r.string("event")?;
        if !(event.contains("BEGIN:VEVENT") && event.contains("END:VEVENT")) {
            return Err(CodecError::InvalidValue {
                field: r.path_of("event"),
                value: event,
                reason: "expected an iCalendar VEVENT".to_string(),
            });
        }
        Ok(TimePeriodData { event })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("event", &self.event);
    }

    wraps!(TimePeriod);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranscoderConfig;
    use crate::model::{ExcludeStrategy, ModifyTaxBasis, TaxCalculationPhase};
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
    fn test_tax() {
        let input = json!({
            "name": "Sales tax",
            "calculation_phase": "TAX_SUBTOTAL_PHASE",
            "inclusion_type": "ADDITIVE",
            "percentage": "8.875"
        });
        let tax: TaxData = decode(input.clone()).unwrap();
        assert_eq!(tax.calculation_phase, TaxCalculationPhase::Subtotal);
        assert_eq!(tax.enabled, None);
        assert_eq!(encode(&tax), input);
    }

    #[test]
    fn test_tax_requires_inclusion_type() {
        let err = decode::<TaxData>(json!({
            "name": "Sales tax",
            "calculation_phase": "TAX_SUBTOTAL_PHASE",
            "percentage": "8.875"
        }))
        .unwrap_err();
        assert_eq!(err.field(), Some("tax_data.inclusion_type"));
        assert_eq!(err.kind(), crate::ErrorKind::MissingRequiredField);
    }

    #[test]
    fn test_discount_defaults_and_tax_basis() {
        let discount: DiscountData = decode(json!({
            "name": "Staff",
            "discount_type": "FIXED_PERCENTAGE",
            "percentage": "10.0",
            "modify_tax_basis": "DO_NOT_MODIFY_TAX_BASIS"
        }))
        .unwrap();
        assert_eq!(discount.modify_tax_basis, Some(ModifyTaxBasis::DoNotModify));
        let out = encode(&discount);
        assert_eq!(out["pin_required"], json!(false));
        assert_eq!(out["label_color"], json!(""));
        assert_eq!(out["percentage"], json!("10.0"));
    }

    #[test]
    fn test_pricing_rule_dates() {
        let rule: PricingRuleData = decode(json!({
            "name": "Happy hour",
            "discount_id": "D1",
            "match_products_id": "PS1",
            "valid_from_date": "2024-01-01",
            "valid_until_date": "2024-12-31",
            "valid_from_local_time": "16:00:00",
            "valid_until_local_time": "18:00:00"
        }))
        .unwrap();
        assert_eq!(rule.exclude_strategy, ExcludeStrategy::LeastExpensive);
        let out = encode(&rule);
        assert_eq!(out["valid_until_local_time"], json!("18:00:00"));
        assert!(out.get("exclude_products_id").is_none());
    }

    #[test]
    fn test_pricing_rule_bad_time() {
        let err = decode::<PricingRuleData>(json!({
            "name": "Happy hour",
            "discount_id": "D1",
            "match_products_id": "PS1",
            "valid_from_local_time": "25:00:00"
        }))
        .unwrap_err();
        assert_eq!(err.field(), Some("pricing_rule_data.valid_from_local_time"));
    }

    #[test]
    fn test_pricing_rule_inverted_dates() {
        let err = decode::<PricingRuleData>(json!({
            "name": "Happy hour",
            "discount_id": "D1",
            "match_products_id": "PS1",
            "valid_from_date": "2024-06-01",
            "valid_until_date": "2024-05-01"
        }))
        .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidValue);
        assert_eq!(err.field(), Some("pricing_rule_data.valid_until_date"));
    }

    #[test]
    fn test_pricing_rule_date_order_is_calendar_order() {
        let rule = |from: &str, until: &str| {
            decode::<PricingRuleData>(json!({
                "name": "New year",
                "discount_id": "D1",
                "match_products_id": "PS1",
                "valid_from_date": from,
                "valid_until_date": until
            }))
        };
        assert!(rule("2024-12-31", "2025-01-01").is_ok());
        assert!(rule("2024-02-29", "2024-02-29").is_ok());
        assert!(rule("2025-01-01", "2024-12-31").is_err());
        assert!(parse_date("2024-12-31").unwrap() < parse_date("2025-01-01").unwrap());
    }

    #[test]
    fn test_product_set_round_trip() {
        let ps: ProductSetData = decode(json!({
            "name": "Pastries",
            "product_ids_any": ["I1", "I2"],
            "quantity_exact": 2
        }))
        .unwrap();
        assert_eq!(ps.quantity, QuantityRule::Exact(2));
        assert_eq!(
            encode(&ps),
            json!({
                "name": "Pastries",
                "all_products": false,
                "product_ids_any": ["I1", "I2"],
                "quantity_exact": 2,
                "quantity_min": 0,
                "quantity_max": 0
            })
        );
    }

    #[test]
    fn test_time_period_requires_vevent() {
        let err = decode::<TimePeriodData>(json!({"event": "not a calendar"})).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidValue);
        let ok: TimePeriodData = decode(json!({
            "event": "BEGIN:VEVENT\nDTSTART:20240101T160000\nDURATION:PT2H\nEND:VEVENT"
        }))
        .unwrap();
        assert!(ok.event.starts_with("BEGIN:VEVENT"));
    }
}
