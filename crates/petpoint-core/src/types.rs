//! # Domain Types
//!
//! Catalog and order types shared by every module.
//!
//! ## Catalog Partition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Tree                                    │
//! │                                                                         │
//! │  Animal          Category          Food parent      Food sub            │
//! │  ───────         ───────────       ───────────      ─────────           │
//! │  cats    ──┬──►  food        ──┬─► dry        ──┬─► kilograms           │
//! │  dogs      │                   │                └─► bag                 │
//! │  birds     │                   └─► wet        ──┬─► cans                │
//! │  fishes    │                                    ├─► snacks              │
//! │            │                                    └─► pouches             │
//! │            ├──►  clean                                                  │
//! │            └──►  accessories                                            │
//! │                                                                         │
//! │  CategoryKey::Simple(clean)            ⇔  column value "clean"          │
//! │  CategoryKey::Food { dry, kilograms }  ⇔  column value "dry.kilograms"  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every key enum parses from (and displays as) the exact lowercase string
//! the backend tables store, so rows round-trip without a mapping layer.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// Builds the `NotAllowed` error used by every key parser below.
fn not_allowed(field: &str, allowed: &[&str]) -> ValidationError {
    ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    }
}

// =============================================================================
// Animal
// =============================================================================

/// Top-level catalog partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Animal {
    Cats,
    Dogs,
    Birds,
    Fishes,
}

impl Animal {
    /// All animals in home-screen order.
    pub const ALL: [Animal; 4] = [Animal::Cats, Animal::Dogs, Animal::Birds, Animal::Fishes];

    /// The key stored in `products.animal_type`.
    pub const fn key(&self) -> &'static str {
        match self {
            Animal::Cats => "cats",
            Animal::Dogs => "dogs",
            Animal::Birds => "birds",
            Animal::Fishes => "fishes",
        }
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Animal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Animal::ALL
            .into_iter()
            .find(|a| a.key() == s.trim())
            .ok_or_else(|| not_allowed("animal", &["cats", "dogs", "birds", "fishes"]))
    }
}

// =============================================================================
// Category
// =============================================================================

/// Second-level partition under an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Category {
    /// Has a further dry/wet → packaging drill-down.
    Food,
    Clean,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Food, Category::Clean, Category::Accessories];

    pub const fn key(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Clean => "clean",
            Category::Accessories => "accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s.trim())
            .ok_or_else(|| not_allowed("category", &["food", "clean", "accessories"]))
    }
}

// =============================================================================
// Food Parent / Food Sub
// =============================================================================

/// Intermediate selection inside the food drill-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FoodParent {
    Dry,
    Wet,
}

impl FoodParent {
    pub const fn key(&self) -> &'static str {
        match self {
            FoodParent::Dry => "dry",
            FoodParent::Wet => "wet",
        }
    }

    /// Leaves offered once this parent is picked.
    pub const fn subs(&self) -> &'static [FoodSub] {
        match self {
            FoodParent::Dry => &[FoodSub::Kilograms, FoodSub::Bag],
            FoodParent::Wet => &[FoodSub::Cans, FoodSub::Snacks, FoodSub::Pouches],
        }
    }
}

impl fmt::Display for FoodParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FoodParent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dry" => Ok(FoodParent::Dry),
            "wet" => Ok(FoodParent::Wet),
            _ => Err(not_allowed("food parent", &["dry", "wet"])),
        }
    }
}

/// Terminal packaging choice. Each sub belongs to exactly one parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FoodSub {
    Kilograms,
    Bag,
    Cans,
    Snacks,
    Pouches,
}

impl FoodSub {
    pub const ALL: [FoodSub; 5] = [
        FoodSub::Kilograms,
        FoodSub::Bag,
        FoodSub::Cans,
        FoodSub::Snacks,
        FoodSub::Pouches,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            FoodSub::Kilograms => "kilograms",
            FoodSub::Bag => "bag",
            FoodSub::Cans => "cans",
            FoodSub::Snacks => "snacks",
            FoodSub::Pouches => "pouches",
        }
    }

    pub const fn parent(&self) -> FoodParent {
        match self {
            FoodSub::Kilograms | FoodSub::Bag => FoodParent::Dry,
            FoodSub::Cans | FoodSub::Snacks | FoodSub::Pouches => FoodParent::Wet,
        }
    }
}

impl fmt::Display for FoodSub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FoodSub {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FoodSub::ALL
            .into_iter()
            .find(|sub| sub.key() == s.trim())
            .ok_or_else(|| {
                not_allowed("food sub", &["kilograms", "bag", "cans", "snacks", "pouches"])
            })
    }
}

// =============================================================================
// Category Key
// =============================================================================

/// The category a product list is filtered by.
///
/// ## Why a Tagged Variant?
/// The table column holds either a flat key (`"clean"`) or a compound food
/// key (`"dry.kilograms"`). Consumers match on the variant instead of
/// splitting strings; [`fmt::Display`] and [`FromStr`] own the column form,
/// and serde goes through them too, so JSON carries `"dry.kilograms"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    /// A flat category. `Simple { key: Food }` marks "food picked, leaf
    /// still pending".
    Simple { key: Category },
    /// A leaf of the food drill-down.
    Food { parent: FoodParent, sub: FoodSub },
}

impl CategoryKey {
    pub const fn simple(key: Category) -> Self {
        CategoryKey::Simple { key }
    }

    /// Builds a food leaf key. The parent is taken from the sub.
    pub const fn food(sub: FoodSub) -> Self {
        CategoryKey::Food {
            parent: sub.parent(),
            sub,
        }
    }

    /// True for keys produced by the food drill-down (`parent.sub`).
    pub const fn is_compound(&self) -> bool {
        matches!(self, CategoryKey::Food { .. })
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKey::Simple { key } => f.write_str(key.key()),
            CategoryKey::Food { parent, sub } => write!(f, "{}.{}", parent, sub),
        }
    }
}

impl FromStr for CategoryKey {
    type Err = ValidationError;

    /// Parses the column form.
    ///
    /// ## Example
    /// ```rust
    /// use petpoint_core::types::{CategoryKey, FoodSub};
    ///
    /// let key: CategoryKey = "wet.cans".parse().unwrap();
    /// assert_eq!(key, CategoryKey::food(FoodSub::Cans));
    /// assert!("dry.cans".parse::<CategoryKey>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((parent, sub)) = s.split_once('.') else {
            return Ok(CategoryKey::simple(s.parse()?));
        };

        let parent: FoodParent = parent.parse()?;
        let sub: FoodSub = sub.parse()?;
        if sub.parent() != parent {
            return Err(ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("{} is not a {} food option", sub, parent),
            });
        }
        Ok(CategoryKey::Food { parent, sub })
    }
}

impl Serialize for CategoryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CategoryKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// =============================================================================
// Language & Bilingual Text
// =============================================================================

/// Display language. Arabic renders right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Lang {
    #[default]
    En,
    Ar,
}

impl Lang {
    pub const fn is_rtl(&self) -> bool {
        matches!(self, Lang::Ar)
    }

    pub const fn toggled(&self) -> Lang {
        match self {
            Lang::En => Lang::Ar,
            Lang::Ar => Lang::En,
        }
    }
}

impl FromStr for Lang {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" => Ok(Lang::En),
            "ar" => Ok(Lang::Ar),
            _ => Err(not_allowed("lang", &["en", "ar"])),
        }
    }
}

/// A string stored once per language (`name_en` / `name_ar` columns).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        LocalizedText {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Same text in both languages.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        LocalizedText {
            en: text.clone(),
            ar: text,
        }
    }

    /// Text for `lang`, falling back to the other language when empty.
    pub fn get(&self, lang: Lang) -> &str {
        let (primary, fallback) = match lang {
            Lang::En => (&self.en, &self.ar),
            Lang::Ar => (&self.ar, &self.en),
        };
        if primary.trim().is_empty() {
            fallback
        } else {
            primary
        }
    }

    pub fn is_blank(&self) -> bool {
        self.en.trim().is_empty() && self.ar.trim().is_empty()
    }
}

// =============================================================================
// Product
// =============================================================================

/// Product identifier as issued by the backend.
///
/// Rows arrive with either numeric or text ids depending on the table, so
/// deserialization accepts both and normalises to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => ProductId(id),
            RawId::Number(id) => ProductId::from(id),
        })
    }
}

/// A catalog row from the `products` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: ProductId,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub image_url: Option<String>,
    pub price: Money,
    /// Units on hand. Never negative once saved.
    pub stock: i64,
    pub animal: Animal,
    /// Column form, `"clean"` or `"dry.kilograms"`.
    #[ts(as = "String")]
    pub category: CategoryKey,
}

impl Product {
    /// True when this product belongs on the list for `animal` / `category`.
    pub fn is_listed_under(&self, animal: Animal, category: &CategoryKey) -> bool {
        self.animal == animal && &self.category == category
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Fulfilment status shown on the admin orders tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Delivered and cancelled orders take no further status changes.
    pub const fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Checks a status change from the admin orders tab.
    ///
    /// Open orders may move to any status. A final order only accepts its
    /// own status again.
    pub fn transition_to(self, next: OrderStatus) -> Result<OrderStatus, ValidationError> {
        if self.is_final() && next != self {
            return Err(not_allowed("status", &[self.key()]));
        }
        Ok(next)
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|st| st.key() == s.trim())
            .ok_or_else(|| {
                not_allowed("status", &["pending", "processing", "delivered", "cancelled"])
            })
    }
}

/// One entry of an order's `items` JSON column.
/// Snapshot of the cart line at the moment the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    pub id: ProductId,
    pub name: LocalizedText,
    #[serde(rename = "qty")]
    pub quantity: u32,
    pub price: Money,
    #[serde(rename = "img")]
    pub image: Option<String>,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

/// A row from the `orders` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,
    /// Signed-in customer, if the order was placed while logged in.
    pub user_id: Option<String>,
    pub customer_name: Option<String>,
    pub phone: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub total: Money,
    pub delivery_fee: Money,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A row from `orders_products`, the analytics join table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderProductRow {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: u32,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animal_parse() {
        assert_eq!("cats".parse::<Animal>().unwrap(), Animal::Cats);
        assert_eq!(" fishes ".parse::<Animal>().unwrap(), Animal::Fishes);
        assert!(matches!(
            "hamsters".parse::<Animal>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_food_sub_parents() {
        for parent in [FoodParent::Dry, FoodParent::Wet] {
            for sub in parent.subs() {
                assert_eq!(sub.parent(), parent);
            }
        }
        assert_eq!(FoodParent::Dry.subs().len() + FoodParent::Wet.subs().len(), 5);
    }

    #[test]
    fn test_category_key_column_form() {
        assert_eq!(CategoryKey::simple(Category::Clean).to_string(), "clean");
        assert_eq!(CategoryKey::food(FoodSub::Kilograms).to_string(), "dry.kilograms");
        assert_eq!(CategoryKey::food(FoodSub::Pouches).to_string(), "wet.pouches");

        assert_eq!(
            "accessories".parse::<CategoryKey>().unwrap(),
            CategoryKey::simple(Category::Accessories)
        );
        assert_eq!(
            "food".parse::<CategoryKey>().unwrap(),
            CategoryKey::simple(Category::Food)
        );
        assert_eq!(
            "dry.bag".parse::<CategoryKey>().unwrap(),
            CategoryKey::food(FoodSub::Bag)
        );
    }

    #[test]
    fn test_category_key_rejects_mismatched_leaf() {
        assert!(matches!(
            "wet.kilograms".parse::<CategoryKey>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!("frozen.cans".parse::<CategoryKey>().is_err());
        assert!("toys".parse::<CategoryKey>().is_err());
    }

    #[test]
    fn test_category_key_json_uses_column_form() {
        let json = serde_json::to_value(CategoryKey::food(FoodSub::Cans)).unwrap();
        assert_eq!(json, serde_json::json!("wet.cans"));

        let simple: CategoryKey = serde_json::from_str("\"clean\"").unwrap();
        assert_eq!(simple, CategoryKey::simple(Category::Clean));

        let err = serde_json::from_str::<CategoryKey>("\"dry.cans\"").unwrap_err();
        assert!(err.to_string().contains("cans is not a dry food option"));
    }

    #[test]
    fn test_product_row_with_column_category() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 12,
            "name": { "en": "Kitten kibble", "ar": "طعام قطط" },
            "description": { "en": "", "ar": "" },
            "imageUrl": null,
            "price": 12000,
            "stock": 4,
            "animal": "cats",
            "category": "dry.kilograms"
        }))
        .unwrap();

        assert_eq!(product.category, CategoryKey::food(FoodSub::Kilograms));
        assert!(product.is_listed_under(Animal::Cats, &CategoryKey::food(FoodSub::Kilograms)));
        assert_eq!(serde_json::to_value(&product).unwrap()["category"], "dry.kilograms");
    }

    #[test]
    fn test_localized_text_fallback() {
        let name = LocalizedText::new("Cat Litter", "");
        assert_eq!(name.get(Lang::En), "Cat Litter");
        assert_eq!(name.get(Lang::Ar), "Cat Litter");

        let name = LocalizedText::new("Cat Litter", "رمل قطط");
        assert_eq!(name.get(Lang::Ar), "رمل قطط");
        assert!(LocalizedText::default().is_blank());
    }

    #[test]
    fn test_lang() {
        assert_eq!(Lang::default(), Lang::En);
        assert!(Lang::Ar.is_rtl());
        assert_eq!(Lang::En.toggled(), Lang::Ar);
        assert_eq!("ar".parse::<Lang>().unwrap(), Lang::Ar);
    }

    #[test]
    fn test_product_id_accepts_numbers_and_text() {
        let numeric: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(numeric.as_str(), "42");
        let text: ProductId = serde_json::from_str("\"a1b2\"").unwrap();
        assert_eq!(text, ProductId::from("a1b2"));
    }

    #[test]
    fn test_order_line_wire_names() {
        let line = OrderLine {
            id: "7".into(),
            name: LocalizedText::same("Bird Seed"),
            quantity: 2,
            price: Money::from_dinars(1500),
            image: None,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["qty"], 2);
        assert_eq!(json["price"], 1500);
        assert!(json.get("img").is_some());
        assert_eq!(line.line_total().dinars(), 3000);
    }

    #[test]
    fn test_order_status() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!("delivered".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert!(OrderStatus::Cancelled.is_final());
        assert!(!OrderStatus::Processing.is_final());
    }

    #[test]
    fn test_order_status_transitions() {
        let pending = OrderStatus::Pending;
        assert_eq!(pending.transition_to(OrderStatus::Delivered), Ok(OrderStatus::Delivered));
        assert_eq!(
            OrderStatus::Processing.transition_to(OrderStatus::Pending),
            Ok(OrderStatus::Pending)
        );
        assert_eq!(
            OrderStatus::Delivered.transition_to(OrderStatus::Delivered),
            Ok(OrderStatus::Delivered)
        );

        let err = OrderStatus::Cancelled.transition_to(OrderStatus::Processing).unwrap_err();
        assert_eq!(err.to_string(), "status must be one of: [\"cancelled\"]");
    }
}
