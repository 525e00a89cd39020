use super::Variant;
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter, Record};
use crate::model::{ModifierData, ModifierListData, Money, ObjectType};
use crate::shape::{FieldKind, FieldShape, Shape, INT, STRING, ZERO};

impl Variant for ModifierListData {
    const TYPE: ObjectType = ObjectType::ModifierList;
    const SHAPE: &'static Shape = &Shape::new(
        "modifier_list_data",
        &[
            FieldShape::required("name", STRING),
            FieldShape::defaulted("ordinal", INT, ZERO),
            FieldShape::required("selection_type", STRING),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(ModifierListData {
            name: r.string("name")?,
            ordinal: r.int("ordinal")?,
            selection_type: r.enumerated("selection_type")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        w.int("ordinal", self.ordinal);
        w.enumerated("selection_type", self.selection_type);
    }

    wraps!(ModifierList);
}

impl Variant for ModifierData {
    const TYPE: ObjectType = ObjectType::Modifier;
    const SHAPE: &'static Shape = &Shape::new(
        "modifier_data",
        &[
            FieldShape::required("name", STRING),
            FieldShape::required("price_money", FieldKind::Block(Money::SHAPE)),
            FieldShape::defaulted("ordinal", INT, ZERO),
            FieldShape::required("modifier_list_id", STRING),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(ModifierData {
            name: r.string("name")?,
            price_money: r.record("price_money")?,
            ordinal: r.int("ordinal")?,
            modifier_list_id: r.string("modifier_list_id")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.string("name", &self.name);
        w.record("price_money", &self.price_money);
        w.int("ordinal", self.ordinal);
        w.string("modifier_list_id", &self.modifier_list_id);
    }

    wraps!(Modifier);
}
