//! The variant codec registry.
//!
//! One [`VariantCodec`] per object type, built at compile time from the
//! type's [`Variant`] implementation. Lookup is an exhaustive match on
//! [`ObjectType`], so adding a tag without a codec fails to compile.

use crate::error::CodecError;
use crate::fields::{FieldReader, FieldWriter};
use crate::model::{
    CatalogObjectData, CategoryData, CustomAttributeDefinitionData, CustomAttributeValueData,
    DiscountData, ImageData, ItemData, ItemOptionData, ItemOptionValueData, ItemVariationData,
    MeasurementUnitData, ModifierData, ModifierListData, ObjectType, PricingRuleData,
    ProductSetData, QuickAmountsSettingsData, SubscriptionPlanData, TaxData, TimePeriodData,
};
use crate::shape::Shape;
use crate::variants::Variant;

type DecodeFn = fn(&FieldReader<'_>) -> Result<CatalogObjectData, CodecError>;
type EncodeFn = fn(&CatalogObjectData, &mut FieldWriter<'_>) -> Result<(), CodecError>;

/// Decode and encode functions for one object type's data block.
pub struct VariantCodec {
    object_type: ObjectType,
    shape: &'static Shape,
    decode: DecodeFn,
    encode: EncodeFn,
}

impl VariantCodec {
    pub const fn of<V: Variant>() -> Self {
        VariantCodec {
            object_type: V::TYPE,
            shape: V::SHAPE,
            decode: decode_variant::<V>,
            encode: encode_variant::<V>,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    pub fn data_key(&self) -> &'static str {
        self.object_type.data_key()
    }

    /// Decode a data block. `reader` must wrap this codec's shape.
    pub fn decode(&self, reader: &FieldReader<'_>) -> Result<CatalogObjectData, CodecError> {
        (self.decode)(reader)
    }

    /// Encode `data` into `writer`. Fails with a shape error when `data`
    /// belongs to a different object type.
    pub fn encode(
        &self,
        data: &CatalogObjectData,
        writer: &mut FieldWriter<'_>,
    ) -> Result<(), CodecError> {
        (self.encode)(data, writer)
    }
}

impl std::fmt::Debug for VariantCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantCodec")
            .field("object_type", &self.object_type)
            .field("shape", &self.shape.name)
            .finish()
    }
}

fn decode_variant<V: Variant>(reader: &FieldReader<'_>) -> Result<CatalogObjectData, CodecError> {
    V::decode(reader).map(V::into_data)
}

fn encode_variant<V: Variant>(
    data: &CatalogObjectData,
    writer: &mut FieldWriter<'_>,
) -> Result<(), CodecError> {
    let value = V::from_data(data).ok_or_else(|| CodecError::Shape {
        field: V::TYPE.data_key().to_string(),
        reason: "data belongs to a different object type",
    })?;
    value.encode(writer);
    Ok(())
}

// ── Codecs ──────────────────────────────────────────────────────────

static ITEM: VariantCodec = VariantCodec::of::<ItemData>();
static ITEM_VARIATION: VariantCodec = VariantCodec::of::<ItemVariationData>();
static CATEGORY: VariantCodec = VariantCodec::of::<CategoryData>();
static TAX: VariantCodec = VariantCodec::of::<TaxData>();
static DISCOUNT: VariantCodec = VariantCodec::of::<DiscountData>();
static MODIFIER_LIST: VariantCodec = VariantCodec::of::<ModifierListData>();
static MODIFIER: VariantCodec = VariantCodec::of::<ModifierData>();
static PRICING_RULE: VariantCodec = VariantCodec::of::<PricingRuleData>();
static PRODUCT_SET: VariantCodec = VariantCodec::of::<ProductSetData>();
static TIME_PERIOD: VariantCodec = VariantCodec::of::<TimePeriodData>();
static MEASUREMENT_UNIT: VariantCodec = VariantCodec::of::<MeasurementUnitData>();
static SUBSCRIPTION_PLAN: VariantCodec = VariantCodec::of::<SubscriptionPlanData>();
static ITEM_OPTION: VariantCodec = VariantCodec::of::<ItemOptionData>();
static ITEM_OPTION_VALUE: VariantCodec = VariantCodec::of::<ItemOptionValueData>();
static CUSTOM_ATTRIBUTE_DEFINITION: VariantCodec =
    VariantCodec::of::<CustomAttributeDefinitionData>();
static CUSTOM_ATTRIBUTE_VALUE: VariantCodec = VariantCodec::of::<CustomAttributeValueData>();
static QUICK_AMOUNTS_SETTINGS: VariantCodec = VariantCodec::of::<QuickAmountsSettingsData>();
static IMAGE: VariantCodec = VariantCodec::of::<ImageData>();

/// The codec for `object_type`.
pub fn codec_for(object_type: ObjectType) -> &'static VariantCodec {
    match object_type {
        ObjectType::Item => &ITEM,
        ObjectType::ItemVariation => &ITEM_VARIATION,
        ObjectType::Category => &CATEGORY,
        ObjectType::Tax => &TAX,
        ObjectType::Discount => &DISCOUNT,
        ObjectType::ModifierList => &MODIFIER_LIST,
        ObjectType::Modifier => &MODIFIER,
        ObjectType::PricingRule => &PRICING_RULE,
        ObjectType::ProductSet => &PRODUCT_SET,
        ObjectType::TimePeriod => &TIME_PERIOD,
        ObjectType::MeasurementUnit => &MEASUREMENT_UNIT,
        ObjectType::SubscriptionPlan => &SUBSCRIPTION_PLAN,
        ObjectType::ItemOption => &ITEM_OPTION,
        ObjectType::ItemOptionValue => &ITEM_OPTION_VALUE,
        ObjectType::CustomAttributeDefinition => &CUSTOM_ATTRIBUTE_DEFINITION,
        ObjectType::CustomAttributeValue => &CUSTOM_ATTRIBUTE_VALUE,
        ObjectType::QuickAmountsSettings => &QUICK_AMOUNTS_SETTINGS,
        ObjectType::Image => &IMAGE,
    }
}

/// Resolve a discriminator tag. Unrecognized tags are `UnknownVariant`.
pub fn lookup(tag: &str) -> Result<&'static VariantCodec, CodecError> {
    tag.parse::<ObjectType>().map(codec_for)
}

/// Every registered codec, in [`ObjectType::ALL`] order.
pub fn codecs() -> impl Iterator<Item = &'static VariantCodec> {
    ObjectType::ALL.into_iter().map(codec_for)
}

/// Decode the data block `reader` wraps as object type `tag`.
///
/// The reader's shape must be the codec's shape; see
/// [`VariantCodec::shape`].
pub fn decode(tag: &str, reader: &FieldReader<'_>) -> Result<CatalogObjectData, CodecError> {
    lookup(tag)?.decode(reader)
}

/// Encode `data` with the codec its object type selects, returning the tag.
pub fn encode(
    data: &CatalogObjectData,
    writer: &mut FieldWriter<'_>,
) -> Result<ObjectType, CodecError> {
    let object_type = data.object_type();
    codec_for(object_type).encode(data, writer)?;
    Ok(object_type)
}
