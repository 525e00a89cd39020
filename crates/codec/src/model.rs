//! Typed catalog entities.
//!
//! These are the values the transcoder produces from a [`crate::ConfigMap`]
//! and consumes when writing one back. They carry no codec logic; the
//! per-variant decode and encode functions live in [`crate::variants`] and
//! the embedded unions in [`crate::nested`].

use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;
use crate::value::{ConfigMap, NestedFields};

/// A closed set of string values with a fixed spelling.
pub trait Enumerated: Sized + Copy + 'static {
    /// Name used in error messages, e.g. `"discount type"`.
    const LABEL: &'static str;
    /// Every accepted spelling, in declaration order.
    const NAMES: &'static [&'static str];

    fn from_name(name: &str) -> Option<Self>;
    fn name(self) -> &'static str;
}

macro_rules! enumerated {
    (
        $(#[$meta:meta])*
        $vis:vis enum $ty:ident ($label:literal) {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $ty {
            $($variant),+
        }

        impl Enumerated for $ty {
            const LABEL: &'static str = $label;
            const NAMES: &'static [&'static str] = &[$($text),+];

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($text => Some($ty::$variant),)+
                    _ => None,
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(Enumerated::name(*self))
            }
        }
    };
}

// ── Object types ────────────────────────────────────────────────────

enumerated! {
    /// The top-level discriminator of a catalog object.
    pub enum ObjectType("object type") {
        Item => "ITEM",
        ItemVariation => "ITEM_VARIATION",
        Category => "CATEGORY",
        Tax => "TAX",
        Discount => "DISCOUNT",
        ModifierList => "MODIFIER_LIST",
        Modifier => "MODIFIER",
        PricingRule => "PRICING_RULE",
        ProductSet => "PRODUCT_SET",
        TimePeriod => "TIME_PERIOD",
        MeasurementUnit => "MEASUREMENT_UNIT",
        SubscriptionPlan => "SUBSCRIPTION_PLAN",
        ItemOption => "ITEM_OPTION",
        ItemOptionValue => "ITEM_OPTION_VAL",
        CustomAttributeDefinition => "CUSTOM_ATTRIBUTE_DEFINITION",
        CustomAttributeValue => "CUSTOM_ATTRIBUTE_VALUE",
        QuickAmountsSettings => "QUICK_AMOUNTS_SETTINGS",
        Image => "IMAGE",
    }
}

impl ObjectType {
    pub const ALL: [ObjectType; 18] = [
        ObjectType::Item,
        ObjectType::ItemVariation,
        ObjectType::Category,
        ObjectType::Tax,
        ObjectType::Discount,
        ObjectType::ModifierList,
        ObjectType::Modifier,
        ObjectType::PricingRule,
        ObjectType::ProductSet,
        ObjectType::TimePeriod,
        ObjectType::MeasurementUnit,
        ObjectType::SubscriptionPlan,
        ObjectType::ItemOption,
        ObjectType::ItemOptionValue,
        ObjectType::CustomAttributeDefinition,
        ObjectType::CustomAttributeValue,
        ObjectType::QuickAmountsSettings,
        ObjectType::Image,
    ];

    pub fn as_str(self) -> &'static str {
        self.name()
    }

    /// Key of the variant's data block in the configuration representation.
    pub fn data_key(self) -> &'static str {
        match self {
            ObjectType::Item => "item_data",
            ObjectType::ItemVariation => "item_variation_data",
            ObjectType::Category => "category_data",
            ObjectType::Tax => "tax_data",
            ObjectType::Discount => "discount_data",
            ObjectType::ModifierList => "modifier_list_data",
            ObjectType::Modifier => "modifier_data",
            ObjectType::PricingRule => "pricing_rule_data",
            ObjectType::ProductSet => "product_set_data",
            ObjectType::TimePeriod => "time_period_data",
            ObjectType::MeasurementUnit => "measurement_unit_data",
            ObjectType::SubscriptionPlan => "subscription_plan_data",
            ObjectType::ItemOption => "item_option_data",
            ObjectType::ItemOptionValue => "item_option_value_data",
            ObjectType::CustomAttributeDefinition => "custom_attribute_definition_data",
            ObjectType::CustomAttributeValue => "custom_attribute_value_data",
            ObjectType::QuickAmountsSettings => "quick_amounts_settings_data",
            ObjectType::Image => "image_data",
        }
    }
}

impl FromStr for ObjectType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectType::from_name(s).ok_or_else(|| CodecError::UnknownVariant {
            union: ObjectType::LABEL,
            value: s.to_string(),
        })
    }
}

// ── Enumerated field values ─────────────────────────────────────────

enumerated! {
    pub enum ProductType("product type") {
        Regular => "REGULAR",
        AppointmentsService => "APPOINTMENTS_SERVICE",
    }
}

enumerated! {
    pub enum PricingType("pricing type") {
        Fixed => "FIXED_PRICING",
        Variable => "VARIABLE_PRICING",
    }
}

enumerated! {
    pub enum InventoryAlertType("inventory alert type") {
        None => "NONE",
        LowQuantity => "LOW_QUANTITY",
    }
}

enumerated! {
    pub enum TaxCalculationPhase("tax calculation phase") {
        Subtotal => "TAX_SUBTOTAL_PHASE",
        Total => "TAX_TOTAL_PHASE",
    }
}

enumerated! {
    pub enum TaxInclusionType("tax inclusion type") {
        Additive => "ADDITIVE",
        Inclusive => "INCLUSIVE",
    }
}

enumerated! {
    pub enum DiscountType("discount type") {
        FixedPercentage => "FIXED_PERCENTAGE",
        VariablePercentage => "VARIABLE_PERCENTAGE",
        FixedAmount => "FIXED_AMOUNT",
        VariableAmount => "VARIABLE_AMOUNT",
    }
}

enumerated! {
    pub enum ModifyTaxBasis("tax basis modification") {
        Modify => "MODIFY_TAX_BASIS",
        DoNotModify => "DO_NOT_MODIFY_TAX_BASIS",
    }
}

enumerated! {
    pub enum ModifierSelectionType("modifier selection type") {
        Single => "SINGLE",
        Multiple => "MULTIPLE",
    }
}

enumerated! {
    pub enum ExcludeStrategy("exclude strategy") {
        LeastExpensive => "LEAST_EXPENSIVE",
        MostExpensive => "MOST_EXPENSIVE",
    }
}

enumerated! {
    pub enum MeasurementUnitType("measurement unit type") {
        Custom => "TYPE_CUSTOM",
        Area => "TYPE_AREA",
        Length => "TYPE_LENGTH",
        Volume => "TYPE_VOLUME",
        Weight => "TYPE_WEIGHT",
        Generic => "TYPE_GENERIC",
        Time => "TYPE_TIME",
    }
}

enumerated! {
    pub enum Cadence("subscription cadence") {
        Daily => "DAILY",
        Weekly => "WEEKLY",
        EveryTwoWeeks => "EVERY_TWO_WEEKS",
        ThirtyDays => "THIRTY_DAYS",
        SixtyDays => "SIXTY_DAYS",
        NinetyDays => "NINETY_DAYS",
        Monthly => "MONTHLY",
        EveryTwoMonths => "EVERY_TWO_MONTHS",
        Quarterly => "QUARTERLY",
        EveryFourMonths => "EVERY_FOUR_MONTHS",
        EverySixMonths => "EVERY_SIX_MONTHS",
        Annual => "ANNUAL",
        EveryTwoYears => "EVERY_TWO_YEARS",
    }
}

enumerated! {
    pub enum CustomAttributeType("custom attribute type") {
        Boolean => "BOOLEAN",
        String => "STRING",
        Number => "NUMBER",
        Selection => "SELECTION",
    }
}

enumerated! {
    pub enum AppVisibility("app visibility") {
        Hidden => "APP_VISIBILITY_HIDDEN",
        ReadOnly => "APP_VISIBILITY_READ_ONLY",
        ReadWriteValues => "APP_VISIBILITY_READ_WRITE_VALUES",
    }
}

enumerated! {
    pub enum SellerVisibility("seller visibility") {
        Hidden => "SELLER_VISIBILITY_HIDDEN",
        ReadWriteValues => "SELLER_VISIBILITY_READ_WRITE_VALUES",
    }
}

enumerated! {
    pub enum QuickAmountsOption("quick amounts option") {
        Disabled => "DISABLED",
        Auto => "AUTO",
        Manual => "MANUAL",
    }
}

enumerated! {
    pub enum QuickAmountType("quick amount type") {
        Manual => "QUICK_AMOUNT_TYPE_MANUAL",
        Auto => "QUICK_AMOUNT_TYPE_AUTO",
    }
}

// ── Envelope ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    /// Amount in the smallest denomination of the currency.
    pub amount: i64,
    pub currency: String,
}

impl Money {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Money {
            amount,
            currency: currency.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogV1Id {
    pub catalog_v1_id: Option<String>,
    pub location_id: Option<String>,
}

/// Where an object is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocationVisibility {
    #[default]
    AllLocations,
    /// `present_at_all_locations` is false. Either list may be absent.
    Explicit {
        present_at: Option<Vec<String>>,
        absent_at: Option<Vec<String>>,
    },
}

/// One catalog entity together with its envelope fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogObject {
    pub id: String,
    pub version: i64,
    pub visibility: LocationVisibility,
    pub image_id: String,
    pub catalog_v1_ids: Vec<CatalogV1Id>,
    pub data: CatalogObjectData,
    /// Top-level keys no shape recognized, re-emitted verbatim on encode.
    pub unknown_fields: ConfigMap,
    /// Data-block keys the variant shape does not recognize.
    pub unknown_data_fields: ConfigMap,
    /// Unrecognized keys inside nested blocks, by block path.
    pub unknown_nested_fields: NestedFields,
}

impl CatalogObject {
    /// A fresh object with default envelope fields.
    pub fn new(id: impl Into<String>, data: CatalogObjectData) -> Self {
        CatalogObject {
            id: id.into(),
            version: 0,
            visibility: LocationVisibility::AllLocations,
            image_id: String::new(),
            catalog_v1_ids: Vec::new(),
            data,
            unknown_fields: ConfigMap::new(),
            unknown_data_fields: ConfigMap::new(),
            unknown_nested_fields: NestedFields::new(),
        }
    }

    pub fn object_type(&self) -> ObjectType {
        self.data.object_type()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogObjectData {
    Item(ItemData),
    ItemVariation(ItemVariationData),
    Category(CategoryData),
    Tax(TaxData),
    Discount(DiscountData),
    ModifierList(ModifierListData),
    Modifier(ModifierData),
    PricingRule(PricingRuleData),
    ProductSet(ProductSetData),
    TimePeriod(TimePeriodData),
    MeasurementUnit(MeasurementUnitData),
    SubscriptionPlan(SubscriptionPlanData),
    ItemOption(ItemOptionData),
    ItemOptionValue(ItemOptionValueData),
    CustomAttributeDefinition(CustomAttributeDefinitionData),
    CustomAttributeValue(CustomAttributeValueData),
    QuickAmountsSettings(QuickAmountsSettingsData),
    Image(ImageData),
}

impl CatalogObjectData {
    pub fn object_type(&self) -> ObjectType {
        match self {
            CatalogObjectData::Item(_) => ObjectType::Item,
            CatalogObjectData::ItemVariation(_) => ObjectType::ItemVariation,
            CatalogObjectData::Category(_) => ObjectType::Category,
            CatalogObjectData::Tax(_) => ObjectType::Tax,
            CatalogObjectData::Discount(_) => ObjectType::Discount,
            CatalogObjectData::ModifierList(_) => ObjectType::ModifierList,
            CatalogObjectData::Modifier(_) => ObjectType::Modifier,
            CatalogObjectData::PricingRule(_) => ObjectType::PricingRule,
            CatalogObjectData::ProductSet(_) => ObjectType::ProductSet,
            CatalogObjectData::TimePeriod(_) => ObjectType::TimePeriod,
            CatalogObjectData::MeasurementUnit(_) => ObjectType::MeasurementUnit,
            CatalogObjectData::SubscriptionPlan(_) => ObjectType::SubscriptionPlan,
            CatalogObjectData::ItemOption(_) => ObjectType::ItemOption,
            CatalogObjectData::ItemOptionValue(_) => ObjectType::ItemOptionValue,
            CatalogObjectData::CustomAttributeDefinition(_) => {
                ObjectType::CustomAttributeDefinition
            }
            CatalogObjectData::CustomAttributeValue(_) => ObjectType::CustomAttributeValue,
            CatalogObjectData::QuickAmountsSettings(_) => ObjectType::QuickAmountsSettings,
            CatalogObjectData::Image(_) => ObjectType::Image,
        }
    }
}

// ── Items ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemData {
    pub name: String,
    pub description: String,
    pub abbreviation: String,
    pub label_color: String,
    pub category_id: String,
    pub available_online: bool,
    pub available_for_pickup: bool,
    pub available_electronically: bool,
    pub skip_modifier_screen: bool,
    pub tax_ids: Vec<String>,
    pub product_type: ProductType,
    pub modifier_list_info: Vec<ModifierListInfo>,
    pub item_options: Vec<ItemOptionRef>,
    /// ITEM_VARIATION objects embedded in the item. Only the flat item form
    /// reads and writes them; the `item_data` block does not carry them.
    pub variations: Vec<CatalogObject>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierListInfo {
    pub modifier_list_id: String,
    pub modifier_overrides: Vec<ModifierOverride>,
    pub min_selected_modifiers: Option<i64>,
    pub max_selected_modifiers: Option<i64>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierOverride {
    pub modifier_id: String,
    pub on_by_default: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOptionRef {
    pub item_option_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemVariationData {
    pub item_id: String,
    pub name: String,
    pub pricing: VariationPricing,
    pub sku: String,
    pub upc: String,
    pub user_data: String,
    pub measurement_unit_id: String,
    pub ordinal: i64,
    pub service_duration: i64,
    pub track_inventory: bool,
    pub available_for_booking: bool,
    pub inventory_alert: InventoryAlert,
    pub team_member_ids: Vec<String>,
    pub item_option_values: Vec<ItemOptionValueRef>,
    pub location_overrides: Vec<LocationOverride>,
}

/// How a variation is priced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariationPricing {
    Fixed(Money),
    /// Price entered at sale time; a suggested price may still be stored.
    Variable(Option<Money>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryAlert {
    /// No alert. A threshold left over from the host configuration is kept
    /// so it round-trips, but has no effect.
    None { threshold: Option<i64> },
    LowQuantity { threshold: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOptionValueRef {
    pub item_option_id: String,
    pub item_option_value_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationOverride {
    pub location_id: String,
    pub pricing: VariationPricing,
    pub track_inventory: bool,
    pub inventory_alert: InventoryAlert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryData {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOptionData {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub show_colors: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOptionValueData {
    pub item_option_id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub ordinal: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub name: String,
    pub url: String,
    pub caption: String,
}

// ── Pricing ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxData {
    pub name: String,
    pub calculation_phase: TaxCalculationPhase,
    pub inclusion_type: TaxInclusionType,
    /// Decimal text, e.g. `"7.25"`.
    pub percentage: String,
    pub applies_to_custom_amounts: Option<bool>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountData {
    pub name: String,
    pub strategy: DiscountStrategy,
    pub pin_required: bool,
    pub label_color: String,
    pub modify_tax_basis: Option<ModifyTaxBasis>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountStrategy {
    FixedPercentage { percentage: String },
    VariablePercentage { percentage: String },
    FixedAmount { amount: Money },
    VariableAmount { amount: Money },
}

impl DiscountStrategy {
    pub fn discount_type(&self) -> DiscountType {
        match self {
            DiscountStrategy::FixedPercentage { .. } => DiscountType::FixedPercentage,
            DiscountStrategy::VariablePercentage { .. } => DiscountType::VariablePercentage,
            DiscountStrategy::FixedAmount { .. } => DiscountType::FixedAmount,
            DiscountStrategy::VariableAmount { .. } => DiscountType::VariableAmount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingRuleData {
    pub name: String,
    pub discount_id: String,
    pub match_products_id: String,
    pub exclude_products_id: Option<String>,
    pub exclude_strategy: ExcludeStrategy,
    pub time_period_ids: Vec<String>,
    pub valid_from_date: Option<String>,
    pub valid_until_date: Option<String>,
    pub valid_from_local_time: Option<String>,
    pub valid_until_local_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSetData {
    pub name: String,
    pub selector: ProductSelector,
    pub quantity: QuantityRule,
}

/// Which products a product set matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSelector {
    AllProducts,
    /// Every listed product must be present.
    AllOf(Vec<String>),
    /// Any listed product matches.
    AnyOf(Vec<String>),
}

/// How many matching products a product set requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityRule {
    Exact(i64),
    Range { min: Option<i64>, max: Option<i64> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePeriodData {
    /// An iCalendar VEVENT.
    pub event: String,
}

// ── Units, plans, settings ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementUnitData {
    pub unit: MeasurementUnitKind,
    pub precision: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasurementUnitKind {
    Custom { name: String, abbreviation: String },
    Area(String),
    Length(String),
    Volume(String),
    Weight(String),
    Generic(String),
    Time(String),
}

impl MeasurementUnitKind {
    pub fn unit_type(&self) -> MeasurementUnitType {
        match self {
            MeasurementUnitKind::Custom { .. } => MeasurementUnitType::Custom,
            MeasurementUnitKind::Area(_) => MeasurementUnitType::Area,
            MeasurementUnitKind::Length(_) => MeasurementUnitType::Length,
            MeasurementUnitKind::Volume(_) => MeasurementUnitType::Volume,
            MeasurementUnitKind::Weight(_) => MeasurementUnitType::Weight,
            MeasurementUnitKind::Generic(_) => MeasurementUnitType::Generic,
            MeasurementUnitKind::Time(_) => MeasurementUnitType::Time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionPlanData {
    pub name: String,
    pub phases: Vec<SubscriptionPhase>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionPhase {
    pub cadence: Cadence,
    pub recurring_price_money: Money,
    pub ordinal: i64,
    pub periods: Option<i64>,
    /// Assigned by the store.
    pub uid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAmountsSettingsData {
    pub option: QuickAmountsOption,
    pub eligible_for_auto_amounts: bool,
    pub amounts: Vec<QuickAmount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAmount {
    pub amount_type: QuickAmountType,
    pub amount: Money,
    pub ordinal: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierListData {
    pub name: String,
    pub ordinal: i64,
    pub selection_type: ModifierSelectionType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierData {
    pub name: String,
    pub price_money: Money,
    pub ordinal: i64,
    pub modifier_list_id: String,
}

// ── Custom attributes ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomAttributeDefinitionData {
    pub name: String,
    pub kind: CustomAttributeKind,
    pub description: Option<String>,
    pub key: Option<String>,
    pub app_visibility: Option<AppVisibility>,
    pub seller_visibility: Option<SellerVisibility>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomAttributeKind {
    Boolean,
    String {
        enforce_uniqueness: bool,
    },
    Number {
        precision: i64,
    },
    Selection {
        max_allowed_selections: i64,
        allowed_selections: Vec<SelectionOption>,
    },
}

impl CustomAttributeKind {
    pub fn attribute_type(&self) -> CustomAttributeType {
        match self {
            CustomAttributeKind::Boolean => CustomAttributeType::Boolean,
            CustomAttributeKind::String { .. } => CustomAttributeType::String,
            CustomAttributeKind::Number { .. } => CustomAttributeType::Number,
            CustomAttributeKind::Selection { .. } => CustomAttributeType::Selection,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOption {
    pub name: String,
    pub uid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomAttributeValueData {
    pub custom_attribute_definition_id: String,
    pub key: String,
    pub name: Option<String>,
    pub value: CustomAttributeValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomAttributeValue {
    Boolean(bool),
    String(String),
    /// Decimal text.
    Number(String),
    /// Uids of the selected options.
    Selection(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_type_names_round_trip() {
        for ty in ObjectType::ALL {
            assert_eq!(ty.as_str().parse::<ObjectType>().unwrap(), ty);
        }
        assert_eq!(ObjectType::NAMES.len(), ObjectType::ALL.len());
    }

    #[test]
    fn test_unknown_object_type() {
        match "WIDGET".parse::<ObjectType>() {
            Err(CodecError::UnknownVariant { union, value }) => {
                assert_eq!(union, "object type");
                assert_eq!(value, "WIDGET");
            }
            other => panic!("expected UnknownVariant, got {:?}", other),
        }
    }

    #[test]
    fn test_data_keys_are_distinct() {
        let mut keys: Vec<&str> = ObjectType::ALL.iter().map(|t| t.data_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 18);
        assert_eq!(ObjectType::ItemOptionValue.data_key(), "item_option_value_data");
        assert_eq!(ObjectType::ItemOptionValue.as_str(), "ITEM_OPTION_VAL");
    }

    #[test]
    fn test_enumerated_display() {
        assert_eq!(PricingType::Variable.to_string(), "VARIABLE_PRICING");
        assert_eq!(Cadence::from_name("EVERY_TWO_YEARS"), Some(Cadence::EveryTwoYears));
        assert_eq!(Cadence::from_name("YEARLY"), None);
    }
}
