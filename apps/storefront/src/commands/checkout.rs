//! # Checkout Commands
//!
//! Commands behind the cart footer and the delivery details form.
//!
//! ## Place Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order(form)                                                      │
//! │       │                                                                 │
//! │       ├── coupon code given? ── find_coupon ── unknown ──► COUPON_ERROR │
//! │       │                                                                 │
//! │       ├── prepare_order ─────── empty cart ────────────► CART_ERROR    │
//! │       │                    ├─── bad phone ─────────────► VALIDATION_…  │
//! │       │                    └─── expired / used up ─────► COUPON_ERROR  │
//! │       │                                                                 │
//! │       ├── cart cleared                                                  │
//! │       │                                                                 │
//! │       └── PlaceOrderResponse { draft, stock_decrements }                │
//! │              │                                                          │
//! │              ▼                                                          │
//! │           shell inserts the order row, then issues the decrements       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use petpoint_core::checkout::{
    active_cities, find_city, find_coupon, prepare_order, quote, CheckoutForm, CheckoutQuote, City,
    Coupon, OrderDraft, StockDecrement,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CartState, CatalogState, ConfigState};

/// Cart footer figures, raw and formatted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteResponse {
    pub quote: CheckoutQuote,
    /// The matched delivery zone, if any.
    pub city: Option<City>,
    pub coupon_code: Option<String>,
    pub formatted_subtotal: String,
    pub formatted_delivery_fee: String,
    pub formatted_total: String,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlaceOrderResponse {
    pub draft: OrderDraft,
    /// Best-effort decrements for the shell to issue after the insert.
    pub stock_decrements: Vec<StockDecrement>,
    pub formatted_total: String,
}

/// Delivery zones for the city picker, in picker order.
pub fn list_cities(catalog: &CatalogState) -> Vec<City> {
    debug!("list_cities command");
    catalog.with_catalog(|snapshot| {
        active_cities(&snapshot.cities)
            .into_iter()
            .cloned()
            .collect()
    })
}

fn resolve_coupon(
    coupons: &[Coupon],
    code: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<Coupon>, ApiError> {
    let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    let coupon = find_coupon(coupons, code)?;
    coupon.ensure_usable(now.date_naive())?;
    Ok(Some(coupon.clone()))
}

/// Prices the cart for the chosen city and coupon.
///
/// ## Arguments
/// * `city` - City picker value (English or Arabic name); unknown means no fee
/// * `coupon_code` - Optional code typed into the cart
///
/// ## Errors
/// `COUPON_ERROR` when the code is unknown, expired or used up.
pub fn quote_checkout(
    cart: &CartState,
    catalog: &CatalogState,
    config: &ConfigState,
    city: Option<&str>,
    coupon_code: Option<&str>,
    now: DateTime<Utc>,
) -> Result<QuoteResponse, ApiError> {
    debug!(?city, ?coupon_code, "quote_checkout command");

    let (city, coupon) = catalog.with_catalog(|snapshot| {
        let city = city.and_then(|c| find_city(&snapshot.cities, c)).cloned();
        resolve_coupon(&snapshot.coupons, coupon_code, now).map(|coupon| (city, coupon))
    })?;

    let quote = cart.with_cart(|c| quote(c, city.as_ref(), coupon.as_ref()));

    Ok(QuoteResponse {
        formatted_subtotal: config.format_currency(quote.subtotal),
        formatted_delivery_fee: config.format_currency(quote.delivery_fee),
        formatted_total: config.format_currency(quote.total),
        coupon_code: coupon.map(|c| c.code),
        city,
        quote,
    })
}

/// Validates the delivery form, builds the order draft and empties the cart.
///
/// The cart is only cleared when the draft is built; on any error it is
/// left exactly as it was.
pub fn place_order(
    cart: &CartState,
    catalog: &CatalogState,
    config: &ConfigState,
    form: CheckoutForm,
    now: DateTime<Utc>,
) -> Result<PlaceOrderResponse, ApiError> {
    debug!(city = ?form.city, coupon = ?form.coupon_code, "place_order command");

    let (cities, coupon) = catalog.with_catalog(|snapshot| {
        resolve_coupon(&snapshot.coupons, form.coupon_code.as_deref(), now)
            .map(|coupon| (snapshot.cities.clone(), coupon))
    })?;

    let draft = cart.with_cart_mut(|c| {
        let draft = prepare_order(c, &form, &cities, coupon.as_ref(), now)?;
        c.clear();
        Ok::<OrderDraft, petpoint_core::CoreError>(draft)
    });

    let draft = match draft {
        Ok(draft) => draft,
        Err(err) => {
            warn!(error = %err, "order rejected");
            return Err(err.into());
        }
    };

    info!(
        reference = %draft.reference,
        lines = draft.items.len(),
        total = draft.total.dinars(),
        city = ?draft.city,
        "order prepared"
    );

    Ok(PlaceOrderResponse {
        stock_decrements: draft.stock_decrements(),
        formatted_total: config.format_currency(draft.total),
        draft,
    })
}
