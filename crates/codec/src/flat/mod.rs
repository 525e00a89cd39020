//! Single-type configuration forms.
//!
//! Each form lists a handful of top-level fields for one object type and
//! fills the rest of the [`crate::CatalogObject`] with the same defaults the
//! full form would apply. Amounts are bare integers in the configured
//! `default_currency`; an object whose money is in another currency cannot
//! be written in a flat form.

mod discount;
mod item;

pub use discount::{FlatDiscount, FLAT_DISCOUNT_SHAPE};
pub use item::{FlatItem, FLAT_ITEM_SHAPE};

use crate::config::TranscoderConfig;
use crate::error::CodecError;
use crate::model::Money;

fn money(amount: i64, config: &TranscoderConfig) -> Money {
    Money::new(amount, config.default_currency.clone())
}

/// The bare amount of `money`, if it is in the default currency.
fn flat_amount(money: &Money, field: String, config: &TranscoderConfig) -> Result<i64, CodecError> {
    if money.currency != config.default_currency {
        return Err(CodecError::InvalidValue {
            field,
            value: money.currency.clone(),
            reason: format!("only {} amounts have a flat form", config.default_currency),
        });
    }
    Ok(money.amount)
}
