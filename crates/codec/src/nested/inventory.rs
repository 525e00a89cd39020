use super::{payload_missing, NestedUnion};
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter};
use crate::model::{Enumerated, InventoryAlert, InventoryAlertType};

impl InventoryAlert {
    pub fn alert_type(&self) -> InventoryAlertType {
        match self {
            InventoryAlert::None { .. } => InventoryAlertType::None,
            InventoryAlert::LowQuantity { .. } => InventoryAlertType::LowQuantity,
        }
    }
}

impl NestedUnion for InventoryAlert {
    const NAME: &'static str = "inventory alert";

    fn decode(r: &FieldReader<'_>) -> Result<Self, CodecError> {
        let alert_type: InventoryAlertType = r.discriminator("inventory_alert_type")?;
        match alert_type {
            InventoryAlertType::None => Ok(InventoryAlert::None {
                threshold: r.opt_int("inventory_alert_threshold")?,
            }),
            InventoryAlertType::LowQuantity => {
                let threshold = r.opt_int("inventory_alert_threshold")?.ok_or_else(|| {
                    payload_missing(r, Self::NAME, alert_type.name(), "inventory_alert_threshold")
                })?;
                Ok(InventoryAlert::LowQuantity { threshold })
            }
        }
    }

    fn encode(&self, w: &mut FieldWriter<'_>) {
        w.enumerated("inventory_alert_type", self.alert_type());
        match self {
            InventoryAlert::None { threshold } => w.opt_int("inventory_alert_threshold", *threshold),
            InventoryAlert::LowQuantity { threshold } => {
                w.int("inventory_alert_threshold", *threshold)
            }
        }
    }
}
