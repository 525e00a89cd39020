//! An item with its variations, priced by type and bare amount.
//!
//! ```toml
//! name = "Coffee"
//!
//! [[variation]]
//! name = "Small"
//! pricing_type = "FIXED_PRICING"
//! amount = 300
//!
//! [[variation]]
//! name = "Refill"
//! pricing_type = "VARIABLE_PRICING"
//! ```

use tracing::debug;

use super::{flat_amount, money};
use crate::config::TranscoderConfig;
use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter};
use crate::model::{
    CatalogObject, CatalogObjectData, InventoryAlert, ItemData, ItemVariationData, ObjectType,
    PricingType, ProductType, VariationPricing,
};
use crate::representation::{wrong_type, Representation};
use crate::shape::{FieldKind, FieldShape, Shape, INT, STRING, ZERO};
use crate::transcoder::id_or_temporary;
use crate::value::ConfigMap;

const VARIATION_SHAPE: Shape = Shape::new(
    "variation",
    &[
        FieldShape::optional("id", STRING),
        FieldShape::optional("item_id", STRING),
        FieldShape::required("name", STRING),
        FieldShape::required("pricing_type", STRING),
        FieldShape::optional("amount", INT),
    ],
);

pub const FLAT_ITEM_SHAPE: Shape = Shape::new(
    "catalog_item",
    &[
        FieldShape::optional("id", STRING),
        FieldShape::required("name", STRING),
        FieldShape::defaulted("version", INT, ZERO),
        FieldShape::required("variation", FieldKind::BlockList(&VARIATION_SHAPE)),
    ],
);

/// The flat item form. Variation `item_id`s are always the item's own id.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatItem;

impl Representation for FlatItem {
    const NAME: &'static str = "catalog_item";

    fn accepts(object_type: ObjectType) -> bool {
        object_type == ObjectType::Item
    }

    fn decode(raw: &ConfigMap, config: &TranscoderConfig) -> Result<CatalogObject, CodecError> {
        let r = FieldReader::new(&FLAT_ITEM_SHAPE, raw, "", config);
        let id = id_or_temporary(r.opt_string("id")?.as_deref(), config);
        let name = r.string("name")?;

        let blocks = r.blocks("variation")?;
        if blocks.is_empty() {
            return Err(CodecError::MissingRequiredField {
                field: r.path_of("variation"),
            });
        }
        let variations = blocks
            .iter()
            .map(|v| decode_variation(v, &id))
            .collect::<Result<Vec<_>, _>>()?;

        let item = ItemData {
            name,
            description: String::new(),
            abbreviation: String::new(),
            label_color: String::new(),
            category_id: String::new(),
            available_online: false,
            available_for_pickup: false,
            available_electronically: false,
            skip_modifier_screen: false,
            tax_ids: Vec::new(),
            product_type: ProductType::Regular,
            modifier_list_info: Vec::new(),
            item_options: Vec::new(),
            variations,
        };
        let mut object = CatalogObject::new(id, CatalogObjectData::Item(item));
        object.version = r.int("version")?;
        object.unknown_fields = r.unknown_fields();
        object.unknown_nested_fields = r.nested_unknown_fields();
        debug!(form = Self::NAME, id = %object.id, variations = blocks.len(), "decoded flat object");
        Ok(object)
    }

    fn encode(object: &CatalogObject, config: &TranscoderConfig) -> Result<ConfigMap, CodecError> {
        let item = match &object.data {
            CatalogObjectData::Item(item) => item,
            _ => return Err(wrong_type(ObjectType::Item, object)),
        };
        if item.variations.is_empty() {
            return Err(CodecError::MissingRequiredField {
                field: "variation".to_string(),
            });
        }
        let rows = item
            .variations
            .iter()
            .enumerate()
            .map(|(i, v)| flat_variation(i, v, config))
            .collect::<Result<Vec<_>, _>>()?;

        let id = id_or_temporary(Some(&object.id), config);
        let mut w = FieldWriter::new(&FLAT_ITEM_SHAPE, "", config)
            .with_nested_unknown(&object.unknown_nested_fields);
        w.string("id", &id);
        w.string("name", &item.name);
        w.int("version", object.version);
        w.blocks("variation", &rows, |row, v| {
            v.string("id", &row.id);
            v.string("item_id", &id);
            v.string("name", row.name);
            v.enumerated("pricing_type", row.pricing_type);
            v.opt_int("amount", row.amount);
        });
        w.extend_unknown(&object.unknown_fields);
        let map = w.finish()?;
        debug!(form = Self::NAME, id = %id, variations = rows.len(), "encoded flat object");
        Ok(map)
    }
}

fn decode_variation(v: &FieldReader<'_>, item_id: &str) -> Result<CatalogObject, CodecError> {
    let config = v.config();
    let id = id_or_temporary(v.opt_string("id")?.as_deref(), config);
    // Computed; whatever was supplied is replaced by the parent id.
    v.opt_string("item_id")?;

    let amount = v.opt_int("amount")?.map(|a| money(a, config));
    let pricing = match v.discriminator::<PricingType>("pricing_type")? {
        PricingType::Fixed => {
            VariationPricing::Fixed(amount.ok_or_else(|| CodecError::MissingRequiredField {
                field: v.path_of("amount"),
            })?)
        }
        PricingType::Variable => VariationPricing::Variable(amount),
    };

    let data = ItemVariationData {
        item_id: item_id.to_string(),
        name: v.string("name")?,
        pricing,
        sku: String::new(),
        upc: String::new(),
        user_data: String::new(),
        measurement_unit_id: String::new(),
        ordinal: 0,
        service_duration: 0,
        track_inventory: false,
        available_for_booking: false,
        inventory_alert: InventoryAlert::None { threshold: None },
        team_member_ids: Vec::new(),
        item_option_values: Vec::new(),
        location_overrides: Vec::new(),
    };
    Ok(CatalogObject::new(id, CatalogObjectData::ItemVariation(data)))
}

/// One `[[variation]]` entry, checked before anything is written.
struct FlatVariation<'o> {
    id: String,
    name: &'o str,
    pricing_type: PricingType,
    amount: Option<i64>,
}

fn flat_variation<'o>(
    index: usize,
    object: &'o CatalogObject,
    config: &TranscoderConfig,
) -> Result<FlatVariation<'o>, CodecError> {
    let data = match &object.data {
        CatalogObjectData::ItemVariation(data) => data,
        _ => return Err(wrong_type(ObjectType::ItemVariation, object)),
    };
    let amount = data
        .pricing
        .price()
        .map(|m| flat_amount(m, format!("variation[{}].amount", index), config))
        .transpose()?;
    Ok(FlatVariation {
        id: id_or_temporary(Some(&object.id), config),
        name: &data.name,
        pricing_type: data.pricing.pricing_type(),
        amount,
    })
}
