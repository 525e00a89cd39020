use super::{forbid, payload_missing, NestedUnion};
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter};
use crate::model::{Enumerated, MeasurementUnitKind, MeasurementUnitType};
use crate::shape::{FieldShape, Shape, STRING};

pub const CUSTOM_UNIT_SHAPE: Shape = Shape::new(
    "custom_unit",
    &[
        FieldShape::required("name", STRING),
        FieldShape::required("abbreviation", STRING),
    ],
);

const PAYLOADS: [&str; 7] = [
    "custom_unit",
    "area_unit",
    "length_unit",
    "volume_unit",
    "weight_unit",
    "generic_unit",
    "time_unit",
];

fn payload_field(unit_type: MeasurementUnitType) -> &'static str {
    match unit_type {
        MeasurementUnitType::Custom => "custom_unit",
        MeasurementUnitType::Area => "area_unit",
        MeasurementUnitType::Length => "length_unit",
        MeasurementUnitType::Volume => "volume_unit",
        MeasurementUnitType::Weight => "weight_unit",
        MeasurementUnitType::Generic => "generic_unit",
        MeasurementUnitType::Time => "time_unit",
    }
}

/// Decodes from the `measurement_unit` block itself.
impl NestedUnion for MeasurementUnitKind {
    const NAME: &'static str = "measurement unit";

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let unit_type: MeasurementUnitType = r.discriminator("type")?;
        let variant = unit_type.name();
        let field = payload_field(unit_type);
        for other in PAYLOADS.iter().filter(|f| **f != field) {
            forbid(r, Self::NAME, variant, other)?;
        }
        let unit = || -> Result<String, CodecError> {
            r.opt_string(field)?
                .filter(|u| !u.is_empty())
                .ok_or_else(|| payload_missing(r, Self::NAME, variant, field))
        };

        Ok(match unit_type {
            MeasurementUnitType::Custom => {
                let custom = r
                    .opt_block(field)?
                    .ok_or_else(|| payload_missing(r, Self::NAME, variant, field))?;
                MeasurementUnitKind::Custom {
                    name: custom.string("name")?,
                    abbreviation: custom.string("abbreviation")?,
                }
            }
            MeasurementUnitType::Area => MeasurementUnitKind::Area(unit()?),
            MeasurementUnitType::Length => MeasurementUnitKind::Length(unit()?),
            MeasurementUnitType::Volume => MeasurementUnitKind::Volume(unit()?),
            MeasurementUnitType::Weight => MeasurementUnitKind::Weight(unit()?),
            MeasurementUnitType::Generic => MeasurementUnitKind::Generic(unit()?),
            MeasurementUnitType::Time => MeasurementUnitKind::Time(unit()?),
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        let unit_type = self.unit_type();
        w.enumerated("type", unit_type);
        let field = payload_field(unit_type);
        match self {
            MeasurementUnitKind::Custom { name, abbreviation } => w.block(field, |b| {
                b.string("name", name);
                b.string("abbreviation", abbreviation);
            }),
            MeasurementUnitKind::Area(unit)
            | MeasurementUnitKind::Length(unit)
            | MeasurementUnitKind::Volume(unit)
            | MeasurementUnitKind::Weight(unit)
            | MeasurementUnitKind::Generic(unit)
            | MeasurementUnitKind::Time(unit) => w.string(field, unit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranscoderConfig;
    use crate::shape::FieldKind;
    use crate::value::{from_json, to_json};
    use serde_json::json;

    const BLOCK: Shape = Shape::new(
        "measurement_unit",
        &[
            FieldShape::required("type", STRING),
            FieldShape::payload("custom_unit", FieldKind::Block(&CUSTOM_UNIT_SHAPE)),
            FieldShape::payload("area_unit", STRING),
            FieldShape::payload("length_unit", STRING),
            FieldShape::payload("volume_unit", STRING),
            FieldShape::payload("weight_unit", STRING),
            FieldShape::payload("generic_unit", STRING),
            FieldShape::payload("time_unit", STRING),
        ],
    );

    fn decode(input: serde_json::Value) -> Result<MeasurementUnitKind, CodecError> {
        let config = TranscoderConfig::default();
        let map = from_json(&input).unwrap();
        MeasurementUnitKind::decode(&FieldReader::new(
            &BLOCK,
            &map,
            "measurement_unit_data.measurement_unit",
            &config,
        ))
    }

    #[test]
    fn test_weight_unit() {
        let kind = decode(json!({"type": "TYPE_WEIGHT", "weight_unit": "IMPERIAL_POUND"})).unwrap();
        assert_eq!(kind, MeasurementUnitKind::Weight("IMPERIAL_POUND".into()));
    }

    #[test]
    fn test_custom_unit_round_trip() {
        let input = json!({
            "type": "TYPE_CUSTOM",
            "custom_unit": {"name": "Scoop", "abbreviation": "sc"}
        });
        let kind = decode(input.clone()).unwrap();
        let config = TranscoderConfig::default();
        let mut w = FieldWriter::new(&BLOCK, "measurement_unit", &config);
        kind.encode(&mut w);
        assert_eq!(to_json(&w.finish().unwrap()), input);
    }

    #[test]
    fn test_empty_payload_is_invalid() {
        match decode(json!({"type": "TYPE_LENGTH", "length_unit": ""})) {
            Err(CodecError::InvalidUnionState { field, .. }) => {
                assert_eq!(field, "measurement_unit_data.measurement_unit.length_unit")
            }
            other => panic!("expected InvalidUnionState, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_of_other_member() {
        let err = decode(json!({
            "type": "TYPE_AREA",
            "area_unit": "METRIC_SQUARE_METER",
            "time_unit": "GENERIC_MINUTE"
        }))
        .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidUnionState);
        assert_eq!(
            err.field(),
            Some("measurement_unit_data.measurement_unit.time_unit")
        );
    }
}
