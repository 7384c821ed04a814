//! # Checkout
//!
//! Turns a cart plus the delivery form into a priced order draft.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout                                        │
//! │                                                                         │
//! │  CartLedger ─────┐                                                      │
//! │                  │                                                      │
//! │  City picker ────┼──► quote() ──► CheckoutQuote                         │
//! │  (find_city)     │                 subtotal − discount + delivery fee   │
//! │                  │                                                      │
//! │  Coupon code ────┘                                                      │
//! │  (find_coupon)                                                          │
//! │                                                                         │
//! │  CheckoutForm ───────► prepare_order() ──► OrderDraft                   │
//! │                         • cart not empty         │                      │
//! │                         • phone valid            ▼                      │
//! │                         • coupon usable    stock_decrements()           │
//! │                                            (best-effort, by caller)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Submitting the draft and decrementing stock are backend calls and stay
//! with the caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::CartLedger;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OrderLine, ProductId};
use crate::validation::{validate_cart_size, validate_phone, validate_quantity};

// =============================================================================
// Delivery Zones
// =============================================================================

/// A row from the `cities` table: one delivery zone and its fee.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct City {
    pub id: String,
    /// English name, also the value stored on orders.
    pub name: String,
    /// Arabic name.
    pub name_ar: String,
    pub fee: Money,
    /// Free-text delivery estimate ("1-2 days").
    pub delivery_time: Option<String>,
    pub active: bool,
    /// Picker position.
    pub sort: i32,
}

/// Active cities in picker order.
pub fn active_cities(cities: &[City]) -> Vec<&City> {
    let mut active: Vec<&City> = cities.iter().filter(|c| c.active).collect();
    active.sort_by_key(|c| c.sort);
    active
}

/// Finds the active city whose English or Arabic name equals `selection`.
pub fn find_city<'a>(cities: &'a [City], selection: &str) -> Option<&'a City> {
    let selection = selection.trim();
    if selection.is_empty() {
        return None;
    }

    cities
        .iter()
        .filter(|c| c.active)
        .find(|c| c.name == selection || c.name_ar == selection)
}

/// Delivery fee for `city`, zero when no city is chosen.
pub fn delivery_fee(city: Option<&City>) -> Money {
    city.map_or(Money::zero(), |c| c.fee)
}

// =============================================================================
// Coupons
// =============================================================================

/// How a coupon reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
#[ts(export)]
pub enum CouponDiscount {
    /// Percentage of the subtotal, 1..=100.
    Percent(u32),
    /// Fixed dinar amount, capped at the subtotal.
    Fixed(Money),
}

/// A row from the `coupons` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub discount: CouponDiscount,
    /// Last day the coupon can be used.
    #[ts(as = "String")]
    pub expire_at: NaiveDate,
    pub usage_limit: u32,
    /// Redemptions so far (`usage_count` column).
    #[serde(default, alias = "usageCount")]
    pub used_count: u32,
}

/// Whether a coupon can still be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum CouponStatus {
    Active,
    Expired,
    Exhausted,
}

impl Coupon {
    /// Status on `today`. Expiry wins over exhaustion.
    pub fn status(&self, today: NaiveDate) -> CouponStatus {
        if self.expire_at < today {
            CouponStatus::Expired
        } else if self.used_count >= self.usage_limit {
            CouponStatus::Exhausted
        } else {
            CouponStatus::Active
        }
    }

    /// Checks the coupon can be redeemed on `today`.
    pub fn ensure_usable(&self, today: NaiveDate) -> CoreResult<()> {
        match self.status(today) {
            CouponStatus::Active => Ok(()),
            CouponStatus::Expired => Err(CoreError::CouponExpired {
                code: self.code.clone(),
                expired_on: self.expire_at,
            }),
            CouponStatus::Exhausted => Err(CoreError::CouponExhausted {
                code: self.code.clone(),
                limit: self.usage_limit,
            }),
        }
    }

    /// Discount this coupon gives on `subtotal`. Never exceeds the subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use petpoint_core::checkout::CouponDiscount;
    /// use petpoint_core::money::Money;
    ///
    /// let pct = CouponDiscount::Percent(10);
    /// assert_eq!(pct.amount_on(Money::from_dinars(3500)).dinars(), 350);
    ///
    /// let fixed = CouponDiscount::Fixed(Money::from_dinars(5000));
    /// assert_eq!(fixed.amount_on(Money::from_dinars(3500)).dinars(), 3500);
    /// ```
    pub fn discount_for(&self, subtotal: Money) -> Money {
        self.discount.amount_on(subtotal)
    }
}

impl CouponDiscount {
    pub fn amount_on(&self, subtotal: Money) -> Money {
        let subtotal = subtotal.non_negative();
        let amount = match self {
            CouponDiscount::Percent(percent) => subtotal.percentage((*percent).min(100)),
            CouponDiscount::Fixed(amount) => amount.non_negative(),
        };
        amount.min(subtotal)
    }
}

/// Finds a coupon by code, ignoring case and surrounding whitespace.
pub fn find_coupon<'a>(coupons: &'a [Coupon], code: &str) -> CoreResult<&'a Coupon> {
    let code = code.trim();
    coupons
        .iter()
        .find(|c| c.code.trim().eq_ignore_ascii_case(code))
        .ok_or_else(|| CoreError::CouponNotFound(code.to_string()))
}

// =============================================================================
// Quote
// =============================================================================

/// The cart footer figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutQuote {
    pub subtotal: Money,
    pub discount: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

/// Prices the cart for the chosen city and (already validated) coupon.
///
/// `total = subtotal − discount + delivery_fee`. The delivery fee is never
/// discounted.
pub fn quote(cart: &CartLedger, city: Option<&City>, coupon: Option<&Coupon>) -> CheckoutQuote {
    let subtotal = cart.subtotal();
    let discount = coupon.map_or(Money::zero(), |c| c.discount_for(subtotal));
    let delivery_fee = delivery_fee(city);

    CheckoutQuote {
        subtotal,
        discount,
        delivery_fee,
        total: subtotal - discount + delivery_fee,
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// What the delivery details form collects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutForm {
    pub customer_name: Option<String>,
    pub phone: String,
    /// City picker value (English or Arabic name) or free text.
    pub city: Option<String>,
    pub address: Option<String>,
    pub coupon_code: Option<String>,
}

/// An order ready to insert into the `orders` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderDraft {
    /// Client-side reference so a retried submit can be recognised.
    #[ts(as = "String")]
    pub reference: Uuid,
    pub customer_name: Option<String>,
    pub phone: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub coupon_code: Option<String>,
    pub items: Vec<OrderLine>,
    pub subtotal: Money,
    pub discount: Money,
    pub delivery_fee: Money,
    pub total: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// One best-effort stock decrement call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockDecrement {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderDraft {
    /// Decrements to issue once the order row exists, one per line.
    pub fn stock_decrements(&self) -> Vec<StockDecrement> {
        self.items
            .iter()
            .map(|line| StockDecrement {
                product_id: line.id.clone(),
                quantity: line.quantity,
            })
            .collect()
    }

    pub fn quote(&self) -> CheckoutQuote {
        CheckoutQuote {
            subtotal: self.subtotal,
            discount: self.discount,
            delivery_fee: self.delivery_fee,
            total: self.total,
        }
    }
}

/// Validates the cart and form and builds the order draft.
///
/// ## Rules
/// - Cart must not be empty, and within the size / quantity caps
/// - Phone is required and must look like a phone number
/// - A given coupon must be usable on `now`'s date
/// - Blank optional fields become `None`
/// - City is stored as the matched zone's English name, or the raw text
///   when it matches no zone (no fee is charged then)
///
/// ## Errors
/// `EmptyCart`, `CartTooLarge`, `QuantityTooLarge`, `CouponExpired`,
/// `CouponExhausted`, or `Validation` for the phone.
pub fn prepare_order(
    cart: &CartLedger,
    form: &CheckoutForm,
    cities: &[City],
    coupon: Option<&Coupon>,
    now: DateTime<Utc>,
) -> CoreResult<OrderDraft> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }
    validate_cart_size(cart.line_count()).map_err(|_| CoreError::CartTooLarge {
        max: crate::MAX_CART_LINES,
    })?;
    for line in cart.lines() {
        validate_quantity(line.quantity).map_err(|_| CoreError::QuantityTooLarge {
            requested: line.quantity,
            max: crate::MAX_LINE_QUANTITY,
        })?;
    }

    let phone = validate_phone(&form.phone)?;
    if let Some(coupon) = coupon {
        coupon.ensure_usable(now.date_naive())?;
    }

    let city_text = non_blank(form.city.as_deref());
    let city = city_text.as_deref().and_then(|c| find_city(cities, c));
    let priced = quote(cart, city, coupon);

    Ok(OrderDraft {
        reference: Uuid::new_v4(),
        customer_name: non_blank(form.customer_name.as_deref()),
        phone,
        city: city.map(|c| c.name.clone()).or(city_text),
        address: non_blank(form.address.as_deref()),
        coupon_code: coupon.map(|c| c.code.clone()),
        items: cart.lines().iter().map(|line| line.to_order_line()).collect(),
        subtotal: priced.subtotal,
        discount: priced.discount,
        delivery_fee: priced.delivery_fee,
        total: priced.total,
        created_at: now,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartProduct;
    use crate::error::ValidationError;
    use chrono::TimeZone;

    fn city(name: &str, name_ar: &str, fee: i64, active: bool, sort: i32) -> City {
        City {
            id: name.to_lowercase(),
            name: name.to_string(),
            name_ar: name_ar.to_string(),
            fee: Money::from_dinars(fee),
            delivery_time: Some("1-2 days".to_string()),
            active,
            sort,
        }
    }

    fn cities() -> Vec<City> {
        vec![
            city("Basra", "البصرة", 5000, true, 2),
            city("Baghdad", "بغداد", 3000, true, 1),
            city("Mosul", "الموصل", 6000, false, 3),
        ]
    }

    fn coupon(discount: CouponDiscount, expire: (i32, u32, u32), used: u32) -> Coupon {
        Coupon {
            id: "c1".to_string(),
            code: "EID25".to_string(),
            discount,
            expire_at: NaiveDate::from_ymd_opt(expire.0, expire.1, expire.2).unwrap(),
            usage_limit: 10,
            used_count: used,
        }
    }

    fn cart() -> CartLedger {
        let mut cart = CartLedger::new();
        let a = CartProduct::new("1", "Kibble", Money::from_dinars(1000));
        let b = CartProduct::new("2", "Litter", Money::from_dinars(500));
        cart.add_to_cart(&a);
        cart.add_to_cart(&a);
        for _ in 0..3 {
            cart.add_to_cart(&b);
        }
        cart
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn form(phone: &str) -> CheckoutForm {
        CheckoutForm {
            phone: phone.to_string(),
            city: Some("بغداد".to_string()),
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn test_find_city_by_either_name() {
        let cities = cities();
        assert_eq!(find_city(&cities, "Baghdad").unwrap().fee.dinars(), 3000);
        assert_eq!(find_city(&cities, "البصرة").unwrap().name, "Basra");
        assert!(find_city(&cities, "Mosul").is_none(), "inactive city");
        assert!(find_city(&cities, "").is_none());
    }

    #[test]
    fn test_active_cities_sorted() {
        let cities = cities();
        let names: Vec<&str> = active_cities(&cities)
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["Baghdad", "Basra"]);
    }

    #[test]
    fn test_quote_without_coupon() {
        let cities = cities();
        let q = quote(&cart(), find_city(&cities, "Baghdad"), None);
        assert_eq!(q.subtotal.dinars(), 3500);
        assert_eq!(q.discount.dinars(), 0);
        assert_eq!(q.delivery_fee.dinars(), 3000);
        assert_eq!(q.total.dinars(), 6500);
    }

    #[test]
    fn test_quote_with_coupon_leaves_fee_alone() {
        let cities = cities();
        let c = coupon(CouponDiscount::Percent(10), (2024, 6, 1), 0);
        let q = quote(&cart(), find_city(&cities, "Baghdad"), Some(&c));
        assert_eq!(q.discount.dinars(), 350);
        assert_eq!(q.total.dinars(), 3500 - 350 + 3000);
    }

    #[test]
    fn test_fixed_coupon_capped_at_subtotal() {
        let c = coupon(CouponDiscount::Fixed(Money::from_dinars(10_000)), (2024, 6, 1), 0);
        let q = quote(&cart(), None, Some(&c));
        assert_eq!(q.discount.dinars(), 3500);
        assert_eq!(q.total.dinars(), 0);
    }

    #[test]
    fn test_coupon_status() {
        let today = now().date_naive();
        assert_eq!(
            coupon(CouponDiscount::Percent(5), (2024, 5, 1), 0).status(today),
            CouponStatus::Active,
            "usable on its last day"
        );
        assert_eq!(
            coupon(CouponDiscount::Percent(5), (2024, 4, 30), 0).status(today),
            CouponStatus::Expired
        );
        assert_eq!(
            coupon(CouponDiscount::Percent(5), (2024, 6, 1), 10).status(today),
            CouponStatus::Exhausted
        );
    }

    #[test]
    fn test_find_coupon_ignores_case() {
        let coupons = vec![coupon(CouponDiscount::Percent(5), (2024, 6, 1), 0)];
        assert!(find_coupon(&coupons, " eid25 ").is_ok());
        assert!(matches!(
            find_coupon(&coupons, "NOPE"),
            Err(CoreError::CouponNotFound(code)) if code == "NOPE"
        ));
    }

    #[test]
    fn test_prepare_order() {
        let cities = cities();
        let mut form = form("0770 123 4567");
        form.customer_name = Some("  ".to_string());
        form.address = Some(" Karrada, street 52 ".to_string());

        let draft = prepare_order(&cart(), &form, &cities, None, now()).unwrap();
        assert_eq!(draft.phone, "07701234567");
        assert_eq!(draft.customer_name, None);
        assert_eq!(draft.address.as_deref(), Some("Karrada, street 52"));
        assert_eq!(draft.city.as_deref(), Some("Baghdad"));
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.total.dinars(), 6500);
        assert_eq!(draft.delivery_fee.dinars(), 3000);
        assert_eq!(draft.created_at, now());
        assert_eq!(
            draft.stock_decrements(),
            vec![
                StockDecrement { product_id: "1".into(), quantity: 2 },
                StockDecrement { product_id: "2".into(), quantity: 3 },
            ]
        );
    }

    #[test]
    fn test_prepare_order_unknown_city_keeps_text_without_fee() {
        let mut form = form("07701234567");
        form.city = Some("Erbil".to_string());
        let draft = prepare_order(&cart(), &form, &cities(), None, now()).unwrap();
        assert_eq!(draft.city.as_deref(), Some("Erbil"));
        assert!(draft.delivery_fee.is_zero());
        assert_eq!(draft.total.dinars(), 3500);
    }

    #[test]
    fn test_prepare_order_rejects_empty_cart() {
        let result =
            prepare_order(&CartLedger::new(), &form("07701234567"), &cities(), None, now());
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_prepare_order_requires_phone() {
        let result = prepare_order(&cart(), &form(""), &cities(), None, now());
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
    }

    #[test]
    fn test_prepare_order_rejects_expired_coupon() {
        let c = coupon(CouponDiscount::Percent(10), (2024, 4, 1), 0);
        let result = prepare_order(&cart(), &form("07701234567"), &cities(), Some(&c), now());
        assert!(matches!(result, Err(CoreError::CouponExpired { .. })));
    }

    #[test]
    fn test_prepare_order_rejects_oversized_line() {
        let mut cart = cart();
        cart.update_quantity(&"1".into(), 5000);
        let result = prepare_order(&cart, &form("07701234567"), &cities(), None, now());
        assert!(matches!(
            result,
            Err(CoreError::QuantityTooLarge { max: 999, .. })
        ));
    }

    #[test]
    fn test_coupon_discount_json() {
        let json = serde_json::to_value(CouponDiscount::Percent(15)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "percent", "value": 15 }));
    }
}
