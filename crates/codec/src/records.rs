//! Small closed blocks shared by several variants.

use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter, Record};
use crate::model::{CatalogV1Id, Money};
use crate::shape::{FieldShape, Shape, INT, STRING};

impl Record for Money {
    const SHAPE: &'static Shape = &Shape::new(
        "money",
        &[
            FieldShape::required("amount", INT),
            FieldShape::required("currency", STRING),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let currency = r.string("currency")?;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CodecError::InvalidValue {
                field: r.path_of("currency"),
                value: currency,
                reason: "expected a three-letter ISO 4217 code".to_string(),
            });
        }
        Ok(Money {
            amount: r.int("amount")?,
            currency,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.int("amount", self.amount);
        w.string("currency", &self.currency);
    }
}

impl Record for CatalogV1Id {
    const SHAPE: &'static Shape = &Shape::new(
        "catalog_v1_id",
        &[
            FieldShape::optional("catalog_v1_id", STRING),
            FieldShape::optional("location_id", STRING),
        ],
    );

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        Ok(CatalogV1Id {
            catalog_v1_id: r.opt_string("catalog_v1_id")?,
            location_id: r.opt_string("location_id")?,
        })
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.opt_string("catalog_v1_id", self.catalog_v1_id.as_deref());
        w.opt_string("location_id", self.location_id.as_deref());
    }
}
