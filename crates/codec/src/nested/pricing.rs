use super::NestedUnion;
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter};
use crate::model::{Money, PricingType, VariationPricing};

impl VariationPricing {
    pub fn pricing_type(&self) -> PricingType {
        match self {
            VariationPricing::Fixed(_) => PricingType::Fixed,
            VariationPricing::Variable(_) => PricingType::Variable,
        }
    }

    pub fn price(&self) -> Option<&Money> {
        match self {
            VariationPricing::Fixed(money) => Some(money),
            VariationPricing::Variable(money) => money.as_ref(),
        }
    }
}

impl NestedUnion for VariationPricing {
    const NAME: &'static str = "variation pricing";

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let pricing_type: PricingType = r.discriminator("pricing_type")?;
        let price = r.opt_record::<Money>("price_money")?;
        match pricing_type {
            PricingType::Fixed => price
                .map(VariationPricing::Fixed)
                .ok_or_else(|| CodecError::MissingRequiredField {
                    field: r.path_of("price_money"),
                }),
            PricingType::Variable => Ok(VariationPricing::Variable(price)),
        }
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.enumerated("pricing_type", self.pricing_type());
        w.opt_record("price_money", self.price());
    }
}
