use super::{forbid, NestedUnion};
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter};
use crate::model::{DiscountStrategy, DiscountType, Enumerated, Money};

impl NestedUnion for DiscountStrategy {
    const NAME: &'static str = "discount strategy";

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let discount_type: DiscountType = r.discriminator("discount_type")?;
        let variant = discount_type.name();
        match discount_type {
            DiscountType::FixedPercentage | DiscountType::VariablePercentage => {
                forbid(r, Self::NAME, variant, "amount_money")?;
                let percentage = r.opt_decimal("percentage")?.ok_or_else(|| {
                    CodecError::MissingRequiredField {
                        field: r.path_of("percentage"),
                    }
                })?;
                Ok(if discount_type == DiscountType::FixedPercentage {
                    DiscountStrategy::FixedPercentage { percentage }
                } else {
                    DiscountStrategy::VariablePercentage { percentage }
                })
            }
            DiscountType::FixedAmount | DiscountType::VariableAmount => {
                forbid(r, Self::NAME, variant, "percentage")?;
                let amount = r.opt_record::<Money>("amount_money")?.ok_or_else(|| {
                    CodecError::MissingRequiredField {
                        field: r.path_of("amount_money"),
                    }
                })?;
                Ok(if discount_type == DiscountType::FixedAmount {
                    DiscountStrategy::FixedAmount { amount }
                } else {
                    DiscountStrategy::VariableAmount { amount }
                })
            }
        }
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.enumerated("discount_type", self.discount_type());
        match self {
            DiscountStrategy::FixedPercentage { percentage }
            | DiscountStrategy::VariablePercentage { percentage } => {
                w.decimal("percentage", percentage);
            }
            DiscountStrategy::FixedAmount { amount } | DiscountStrategy::VariableAmount { amount } => {
                w.record("amount_money", amount);
            }
        }
    }
}
