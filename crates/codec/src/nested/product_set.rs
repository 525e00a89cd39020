use tracing::warn;

use super::{payload_missing, NestedUnion};
use crate::config::QuantityPresence;
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter};
use crate::model::{ProductSelector, QuantityRule};

impl NestedUnion for ProductSelector {
    const NAME: &'static str = "product selector";

    /// `all_products` wins, then `product_ids_all`, then `product_ids_any`.
    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let all_products = r.bool("all_products")?;
        let all_of = r.opt_strings("product_ids_all")?;
        let any_of = r.opt_strings("product_ids_any")?;

        let (selector, winner) = if all_products {
            (ProductSelector::AllProducts, "all_products")
        } else if let Some(ids) = all_of.clone() {
            (ProductSelector::AllOf(ids), "product_ids_all")
        } else if let Some(ids) = any_of.clone() {
            (ProductSelector::AnyOf(ids), "product_ids_any")
        } else {
            return Err(payload_missing(r, Self::NAME, "unresolved", "product_ids_any"));
        };

        let ignored: Vec<&str> = [
            ("product_ids_all", all_of.is_some()),
            ("product_ids_any", any_of.is_some()),
        ]
        .into_iter()
        .filter(|(name, present)| *present && *name != winner)
        .map(|(name, _)| name)
        .collect();
        if !ignored.is_empty() {
            warn!(
                field = %r.path_of(winner),
                ?ignored,
                "product set selects by more than one member; lower-priority members ignored"
            );
        }
        Ok(selector)
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        match self {
            ProductSelector::AllProducts => w.bool("all_products", true),
            ProductSelector::AllOf(ids) => {
                w.bool("all_products", false);
                w.strings("product_ids_all", ids);
            }
            ProductSelector::AnyOf(ids) => {
                w.bool("all_products", false);
                w.strings("product_ids_any", ids);
            }
        }
    }
}

impl NestedUnion for QuantityRule {
    const NAME: &'static str = "quantity rule";

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let exact = r.opt_int("quantity_exact")?;
        let min = r.opt_int("quantity_min")?;
        let max = r.opt_int("quantity_max")?;
        let missing = || CodecError::MissingQuantityConstraint {
            field: r.path_of("quantity_exact"),
        };

        match r.config().quantity_presence {
            QuantityPresence::ZeroIsUnset => {
                let (exact, min, max) = (exact.unwrap_or(0), min.unwrap_or(0), max.unwrap_or(0));
                if exact != 0 {
                    if min != 0 || max != 0 {
                        warn!(
                            field = %r.path_of("quantity_exact"),
                            "non-zero quantity_exact overrides quantity_min/quantity_max"
                        );
                    }
                    Ok(QuantityRule::Exact(exact))
                } else if min != 0 || max != 0 {
                    Ok(QuantityRule::Range {
                        min: Some(min),
                        max: Some(max),
                    })
                } else {
                    Err(missing())
                }
            }
            QuantityPresence::Explicit => match (exact, min, max) {
                (Some(_), Some(_), _) => Err(combined(r, "quantity_min")),
                (Some(_), None, Some(_)) => Err(combined(r, "quantity_max")),
                (Some(exact), None, None) => Ok(QuantityRule::Exact(exact)),
                (None, None, None) => Err(missing()),
                (None, min, max) => Ok(QuantityRule::Range { min, max }),
            },
        }
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        match w.config().quantity_presence {
            QuantityPresence::ZeroIsUnset => {
                let (exact, min, max) = match self {
                    QuantityRule::Exact(n) => (*n, 0, 0),
                    QuantityRule::Range { min, max } => (0, min.unwrap_or(0), max.unwrap_or(0)),
                };
                w.int("quantity_exact", exact);
                w.int("quantity_min", min);
                w.int("quantity_max", max);
            }
            QuantityPresence::Explicit => match self {
                QuantityRule::Exact(n) => w.int("quantity_exact", *n),
                QuantityRule::Range { min, max } => {
                    w.opt_int("quantity_min", *min);
                    w.opt_int("quantity_max", *max);
                }
            },
        }
    }
}

fn combined(r: &FieldReader<'_>, field: &str) -> CodecError {
    CodecError::InvalidUnionState {
        union: QuantityRule::NAME,
        variant: "exact".to_string(),
        field: r.path_of(field),
        reason: "cannot be combined with quantity_exact",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranscoderConfig;
    use crate::shape::{FieldShape, Shape, BOOL, FALSE, INT, STRINGS};
    use crate::value::{from_json, to_json};
    use serde_json::json;

    const PARENT: Shape = Shape::new(
        "product_set_data",
        &[
            FieldShape::defaulted("all_products", BOOL, FALSE),
            FieldShape::payload("product_ids_all", STRINGS),
            FieldShape::payload("product_ids_any", STRINGS),
            FieldShape::payload("quantity_exact", INT),
            FieldShape::payload("quantity_min", INT),
            FieldShape::payload("quantity_max", INT),
        ],
    );

    fn explicit() -> TranscoderConfig {
        TranscoderConfig {
            quantity_presence: QuantityPresence::Explicit,
            ..TranscoderConfig::default()
        }
    }

    fn quantity(input: serde_json::Value, config: &TranscoderConfig) -> Result<QuantityRule, CodecError> {
        let map = from_json(&input).unwrap();
        QuantityRule::decode(&FieldReader::new(&PARENT, &map, "product_set_data", config))
    }

    fn selector(input: serde_json::Value) -> Result<ProductSelector, CodecError> {
        let config = TranscoderConfig::default();
        let map = from_json(&input).unwrap();
        ProductSelector::decode(&FieldReader::new(&PARENT, &map, "product_set_data", &config))
    }

    #[test]
    fn test_all_zero_quantity_is_missing() {
        let config = TranscoderConfig::default();
        match quantity(json!({"quantity_exact": 0, "quantity_min": 0, "quantity_max": 0}), &config) {
            Err(CodecError::MissingQuantityConstraint { field }) => {
                assert_eq!(field, "product_set_data.quantity_exact")
            }
            other => panic!("expected MissingQuantityConstraint, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_wins_over_range() {
        let config = TranscoderConfig::default();
        let rule = quantity(json!({"quantity_exact": 2, "quantity_min": 1}), &config).unwrap();
        assert_eq!(rule, QuantityRule::Exact(2));
    }

    #[test]
    fn test_range_under_zero_is_unset() {
        let config = TranscoderConfig::default();
        let rule = quantity(json!({"quantity_min": 3}), &config).unwrap();
        assert_eq!(
            rule,
            QuantityRule::Range {
                min: Some(3),
                max: Some(0)
            }
        );
        let mut w = FieldWriter::new(&PARENT, "product_set_data", &config);
        rule.encode(&mut w);
        assert_eq!(
            to_json(&w.finish().unwrap()),
            json!({"quantity_exact": 0, "quantity_min": 3, "quantity_max": 0})
        );
    }

    #[test]
    fn test_explicit_zero_exact() {
        let rule = quantity(json!({"quantity_exact": 0}), &explicit()).unwrap();
        assert_eq!(rule, QuantityRule::Exact(0));
    }

    #[test]
    fn test_explicit_exact_and_range_conflict() {
        match quantity(json!({"quantity_exact": 1, "quantity_max": 4}), &explicit()) {
            Err(CodecError::InvalidUnionState { field, .. }) => {
                assert_eq!(field, "product_set_data.quantity_max")
            }
            other => panic!("expected InvalidUnionState, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_encode_writes_only_present_fields() {
        let config = explicit();
        let rule = quantity(json!({"quantity_max": 5}), &config).unwrap();
        let mut w = FieldWriter::new(&PARENT, "product_set_data", &config);
        rule.encode(&mut w);
        assert_eq!(to_json(&w.finish().unwrap()), json!({"quantity_max": 5}));
    }

    #[test]
    fn test_selector_priority() {
        assert_eq!(
            selector(json!({"all_products": true, "product_ids_any": ["a"]})).unwrap(),
            ProductSelector::AllProducts
        );
        assert_eq!(
            selector(json!({"product_ids_all": ["a"], "product_ids_any": ["b"]})).unwrap(),
            ProductSelector::AllOf(vec!["a".into()])
        );
        assert_eq!(
            selector(json!({"product_ids_any": ["b"]})).unwrap(),
            ProductSelector::AnyOf(vec!["b".into()])
        );
    }

    #[test]
    fn test_selector_requires_a_member() {
        let err = selector(json!({"all_products": false})).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidUnionState);
    }
}
