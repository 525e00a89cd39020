//! Variants with little or no internal structure.

use super::Variant;
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter, Record};
use crate::model::{
    CategoryData, ImageData, MeasurementUnitData, MeasurementUnitKind, Money, ObjectType,
    QuickAmount, QuickAmountsSettingsData,
};
use crate::nested::{NestedUnion, CUSTOM_UNIT_SHAPE};
use crate::shape::{FieldKind, FieldShape, Shape, BOOL, EMPTY, FALSE, INT, NO_ITEMS, STRING, ZERO};

const MAX_UNIT_PRECISION: i64 = 5;

impl Variant for CategoryData {
    const TYPE: ObjectType = ObjectType::Category;
    const SHAPE: &'static Shape = &Shape::new(
        "category_data",
        &[FieldShape::required("name", STRING)],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(CategoryData {
            name: r.string("name")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
    }

    wraps!(Category);
}

const MEASUREMENT_UNIT: Shape = Shape::new(
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

impl Variant for MeasurementUnitData {
    const TYPE: ObjectType = ObjectType::MeasurementUnit;
    const SHAPE: &'static Shape = &Shape::new(
        "measurement_unit_data",
        &[
            FieldShape::required("measurement_unit", FieldKind::Block(&MEASUREMENT_UNIT)),
            FieldShape::optional("precision", INT),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let unit = MeasurementUnitKind::decode(&r.block("measurement_unit")?)?;
        let precision = r.opt_int("precision")?;
        if let Some(p) = precision.filter(|p| !(0..=MAX_UNIT_PRECISION).contains(p)) {
            return Err(CodecError::InvalidValue {
                field: r.path_of("precision"),
                value: p.to_string(),
                reason: format!("must be between 0 and {}", MAX_UNIT_PRECISION),
            });
        }
        Ok(MeasurementUnitData { unit, precision })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.block("measurement_unit", |b| self.unit.encode(b));
        w.opt_int("precision", self.precision);
    }

    wraps!(MeasurementUnit);
}

impl Variant for QuickAmountsSettingsData {
    const TYPE: ObjectType = ObjectType::QuickAmountsSettings;
    const SHAPE: &'static Shape = &Shape::new(
        "quick_amounts_settings_data",
        &[
            FieldShape::required("option", STRING),
            FieldShape::defaulted("eligible_for_auto_amounts", BOOL, FALSE),
            FieldShape::defaulted("amounts", FieldKind::BlockList(QuickAmount::SHAPE), NO_ITEMS),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(QuickAmountsSettingsData {
            option: r.enumerated("option")?,
            eligible_for_auto_amounts: r.bool("eligible_for_auto_amounts")?,
            amounts: r.records("amounts")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.enumerated("option", self.option);
        w.bool("eligible_for_auto_amounts", self.eligible_for_auto_amounts);
        w.records("amounts", &self.amounts);
    }

    wraps!(QuickAmountsSettings);
}

impl Record for QuickAmount {
    const SHAPE: &'static Shape = &Shape::new(
        "quick_amount",
        &[
            FieldShape::required("type", STRING),
            FieldShape::required("amount", FieldKind::Block(Money::SHAPE)),
            FieldShape::defaulted("ordinal", INT, ZERO),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(QuickAmount {
            amount_type: r.enumerated("type")?,
            amount: r.record("amount")?,
            ordinal: r.int("ordinal")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.enumerated("type", self.amount_type);
        w.record("amount", &self.amount);
        w.int("ordinal", self.ordinal);
    }
}

impl Variant for ImageData {
    const TYPE: ObjectType = ObjectType::Image;
    const SHAPE: &'static Shape = &Shape::new(
        "image_data",
        &[
            FieldShape::required("name", STRING),
            FieldShape::required("url", STRING),
            FieldShape::defaulted("caption", STRING, EMPTY),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let url = r.string("url")?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(CodecError::InvalidValue {
                field: r.path_of("url"),
                value: url,
                reason: "expected an http or https URL".to_string(),
            });
        }
        Ok(ImageData {
            name: r.string("name")?,
            url,
            caption: r.string("caption")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        w.string("url", &self.url);
        w.string("caption", &self.caption);
    }

    wraps!(Image);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranscoderConfig;
    use crate::model::QuickAmountsOption;
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
    fn test_measurement_unit_precision_absent_stays_absent() {
        let input = json!({"measurement_unit": {"type": "TYPE_VOLUME", "volume_unit": "GENERIC_FLUID_OUNCE"}});
        let unit: MeasurementUnitData = decode(input.clone()).unwrap();
        assert_eq!(unit.precision, None);
        assert_eq!(encode(&unit), input);
    }

    #[test]
    fn test_measurement_unit_zero_precision_kept() {
        let input = json!({
            "measurement_unit": {"type": "TYPE_GENERIC", "generic_unit": "UNIT"},
            "precision": 0
        });
        let unit: MeasurementUnitData = decode(input.clone()).unwrap();
        assert_eq!(unit.precision, Some(0));
        assert_eq!(encode(&unit), input);
    }

    #[test]
    fn test_measurement_unit_extra_key_is_not_an_error() {
        let unit: MeasurementUnitData = decode(json!({
            "measurement_unit": {"type": "TYPE_TIME", "time_unit": "GENERIC_HOUR", "extra": 1}
        }))
        .unwrap();
        assert_eq!(
            unit.unit,
            MeasurementUnitKind::Time("GENERIC_HOUR".into())
        );
    }

    #[test]
    fn test_quick_amounts() {
        let settings: QuickAmountsSettingsData = decode(json!({
            "option": "MANUAL",
            "amounts": [{"type": "QUICK_AMOUNT_TYPE_MANUAL", "amount": {"amount": 500, "currency": "USD"}}]
        }))
        .unwrap();
        assert_eq!(settings.option, QuickAmountsOption::Manual);
        assert_eq!(settings.amounts[0].ordinal, 0);
        assert_eq!(encode(&settings)["eligible_for_auto_amounts"], json!(false));
    }

    #[test]
    fn test_image_requires_url_scheme() {
        let err = decode::<ImageData>(json!({"name": "hero", "url": "ftp://x"})).unwrap_err();
        assert_eq!(err.field(), Some("image_data.url"));
        let image: ImageData = decode(json!({"name": "hero", "url": "https://cdn.example.com/a.png"})).unwrap();
        assert_eq!(image.caption, "");
    }
}
