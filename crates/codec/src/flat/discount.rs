//! A discount as a type plus either a percentage or a bare amount.
//!
//! ```toml
//! name = "Staff"
//! type = "FIXED_PERCENTAGE"
//! percentage = "15"
//! ```

use tracing::debug;

use super::{flat_amount, money};
use crate::config::TranscoderConfig;
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter};
use crate::model::{
    CatalogObject, CatalogObjectData, DiscountData, DiscountStrategy, DiscountType, Enumerated,
    ObjectType,
};
use crate::nested::forbid;
use crate::representation::{wrong_type, Representation};
use crate::shape::{FieldShape, Shape, DECIMAL, INT, STRING, ZERO};
use crate::transcoder::id_or_temporary;
use crate::value::{ConfigMap, ConfigValue};

const UNION: &str = "discount strategy";

pub const FLAT_DISCOUNT_SHAPE: Shape = Shape::new(
    "catalog_discount",
    &[
        FieldShape::optional("id", STRING),
        FieldShape::required("name", STRING),
        FieldShape::required("type", STRING),
        FieldShape::payload("percentage", DECIMAL),
        FieldShape::payload("amount", INT),
        FieldShape::defaulted("version", INT, ZERO),
    ],
);

/// The flat discount form. PIN, label color and tax basis keep their
/// defaults and are not written back.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatDiscount;

impl Representation for FlatDiscount {
    const NAME: &'static str = "catalog_discount";

    fn accepts(object_type: ObjectType) -> bool {
        object_type == ObjectType::Discount
    }

    fn decode(raw: &ConfigMap, config: &TranscoderConfig) -> Result<CatalogObject, CodecError> {
        let r = FieldReader::new(&FLAT_DISCOUNT_SHAPE, raw, "", config);
        let discount_type: DiscountType = r.discriminator("type")?;
        let variant = discount_type.name();

        let strategy = match discount_type {
            DiscountType::FixedPercentage | DiscountType::VariablePercentage => {
                forbid(&r, UNION, variant, "amount")?;
                // An empty string is how hosts leave the percentage unset.
                let percentage = match raw.get("percentage") {
                    Some(ConfigValue::String(s)) if s.is_empty() => None,
                    _ => r.opt_decimal("percentage")?,
                }
                .ok_or_else(|| CodecError::MissingRequiredField {
                    field: r.path_of("percentage"),
                })?;
                if discount_type == DiscountType::FixedPercentage {
                    DiscountStrategy::FixedPercentage { percentage }
                } else {
                    DiscountStrategy::VariablePercentage { percentage }
                }
            }
            DiscountType::FixedAmount | DiscountType::VariableAmount => {
                forbid(&r, UNION, variant, "percentage")?;
                let amount = match r.opt_int("amount")? {
                    Some(amount) if amount != 0 => money(amount, config),
                    _ => {
                        return Err(CodecError::MissingRequiredField {
                            field: r.path_of("amount"),
                        })
                    }
                };
                if discount_type == DiscountType::FixedAmount {
                    DiscountStrategy::FixedAmount { amount }
                } else {
                    DiscountStrategy::VariableAmount { amount }
                }
            }
        };

        let discount = DiscountData {
            name: r.string("name")?,
            strategy,
            pin_required: false,
            label_color: String::new(),
            modify_tax_basis: None,
        };
        let id = id_or_temporary(r.opt_string("id")?.as_deref(), config);
        let mut object = CatalogObject::new(id, CatalogObjectData::Discount(discount));
        object.version = r.int("version")?;
        object.unknown_fields = r.unknown_fields();
        debug!(form = Self::NAME, id = %object.id, discount_type = %discount_type, "decoded flat object");
        Ok(object)
    }

    fn encode(object: &CatalogObject, config: &TranscoderConfig) -> Result<ConfigMap, CodecError> {
        let discount = match &object.data {
            CatalogObjectData::Discount(discount) => discount,
            _ => return Err(wrong_type(ObjectType::Discount, object)),
        };
        let id = id_or_temporary(Some(&object.id), config);

        let mut w = FieldWriter::new(&FLAT_DISCOUNT_SHAPE, "", config);
        w.string("id", &id);
        w.string("name", &discount.name);
        w.enumerated("type", discount.strategy.discount_type());
        match &discount.strategy {
            DiscountStrategy::FixedPercentage { percentage }
            | DiscountStrategy::VariablePercentage { percentage } => {
                w.decimal("percentage", percentage);
            }
            DiscountStrategy::FixedAmount { amount } | DiscountStrategy::VariableAmount { amount } => {
                w.int("amount", flat_amount(amount, "amount".to_string(), config)?);
            }
        }
        w.int("version", object.version);
        w.extend_unknown(&object.unknown_fields);
        let map = w.finish()?;
        debug!(form = Self::NAME, id = %id, "encoded flat object");
        Ok(map)
    }
}
