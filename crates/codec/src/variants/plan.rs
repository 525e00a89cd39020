use super::Variant;
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter, Record};
use crate::model::{Money, ObjectType, SubscriptionPhase, SubscriptionPlanData};
use crate::shape::{FieldKind, FieldShape, Shape, INT, STRING, ZERO};

impl Variant for SubscriptionPlanData {
    const TYPE: ObjectType = ObjectType::SubscriptionPlan;
    const SHAPE: &'static Shape = &Shape::new(
        "subscription_plan_data",
        &[
            FieldShape::required("name", STRING),
            FieldShape::required("phases", FieldKind::BlockList(SubscriptionPhase::SHAPE)),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let name = r.string("name")?;
        let phases: Vec<SubscriptionPhase> = r.records("phases")?;
        if phases.is_empty() {
            return Err(CodecError::InvalidValue {
                field: r.path_of("phases"),
                value: "[]".to_string(),
                reason: "a plan needs at least one phase".to_string(),
            });
        }
        Ok(SubscriptionPlanData { name, phases })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        w.records("phases", &self.phases);
    }

    wraps!(SubscriptionPlan);
}

impl Record for SubscriptionPhase {
    const SHAPE: &'static Shape = &Shape::new(
        "phase",
        &[
            FieldShape::required("cadence", STRING),
            FieldShape::required("recurring_price_money", FieldKind::Block(Money::SHAPE)),
            FieldShape::defaulted("ordinal", INT, ZERO),
            FieldShape::optional("periods", INT),
            FieldShape::optional("uid", STRING),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let periods = r.opt_int("periods")?;
        if let Some(n) = periods.filter(|n| *n < 1) {
            return Err(CodecError::InvalidValue {
                field: r.path_of("periods"),
                value: n.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(SubscriptionPhase {
            cadence: r.enumerated("cadence")?,
            recurring_price_money: r.record("recurring_price_money")?,
            ordinal: r.int("ordinal")?,
            periods,
            uid: r.opt_string("uid")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.enumerated("cadence", self.cadence);
        w.record("recurring_price_money", &self.recurring_price_money);
        w.int("ordinal", self.ordinal);
        w.opt_int("periods", self.periods);
        w.opt_string("uid", self.uid.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranscoderConfig;
    use crate::model::Cadence;
    use crate::value::{from_json, to_json};
    use serde_json::json;

    fn decode(input: serde_json::Value) -> Result<SubscriptionPlanData, CodecError> {
        let config = TranscoderConfig::default();
        let map = from_json(&input).unwrap();
        SubscriptionPlanData::decode(&FieldReader::new(
            SubscriptionPlanData::SHAPE,
            &map,
            "subscription_plan_data",
            &config,
        ))
    }

    #[test]
    fn test_plan_phases() {
        let input = json!({
            "name": "Coffee club",
            "phases": [
                {
                    "cadence": "MONTHLY",
                    "recurring_price_money": {"amount": 1000, "currency": "USD"},
                    "ordinal": 0,
                    "periods": 3
                },
                {
                    "cadence": "ANNUAL",
                    "recurring_price_money": {"amount": 9900, "currency": "USD"},
                    "ordinal": 1,
                    "uid": "PHASE2"
                }
            ]
        });
        let plan = decode(input.clone()).unwrap();
        assert_eq!(plan.phases[0].cadence, Cadence::Monthly);
        assert_eq!(plan.phases[1].periods, None);

        let config = TranscoderConfig::default();
        let mut w = FieldWriter::new(SubscriptionPlanData::SHAPE, "subscription_plan_data", &config);
        plan.encode(&mut w);
        assert_eq!(to_json(&w.finish().unwrap()), input);
    }

    #[test]
    fn test_plan_requires_phases() {
        let err = decode(json!({"name": "Coffee club"})).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::MissingRequiredField);
        let err = decode(json!({"name": "Coffee club", "phases": []})).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_unknown_cadence() {
        let err = decode(json!({
            "name": "Coffee club",
            "phases": [{
                "cadence": "FORTNIGHTLY",
                "recurring_price_money": {"amount": 1000, "currency": "USD"}
            }]
        }))
        .unwrap_err();
        assert_eq!(err.field(), Some("subscription_plan_data.phases[0].cadence"));
    }
}
