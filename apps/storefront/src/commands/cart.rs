//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Delivery │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                   add_to_cart      quote_checkout    place_order       │
//! │                   update_quantity  (checkout.rs)     (checkout.rs)     │
//! │                   remove_from_cart                        │             │
//! │                                                           ▼             │
//! │                                    clear_cart ◄───────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of the ledger mutations fail: an id that is not in the cart is a
//! no-op, reported in the log only.

use chrono::{DateTime, Utc};
use petpoint_core::cart::{CartAction, CartLedger, CartLine, CartProduct};
use petpoint_core::promotions::active_price;
use petpoint_core::types::ProductId;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CartState, CartTotals, CatalogState};

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&CartLedger> for CartResponse {
    fn from(cart: &CartLedger) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds one unit of a catalog product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity + 1
/// - Not in cart: appended with quantity 1
/// - Price is "frozen" at the first add, flash sale included
///
/// ## Errors
/// `NOT_FOUND` when the id is not in the last fetched catalog.
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: ProductId,
    now: DateTime<Utc>,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = catalog
        .with_catalog(|snapshot| {
            snapshot.product(&product_id).map(|p| {
                CartProduct::from_product(p, active_price(p, &snapshot.flash_sales, now))
            })
        })
        .ok_or_else(|| ApiError::not_found("Product", product_id.as_str()))?;

    Ok(cart.with_cart_mut(|c| {
        c.add_to_cart(&product);
        CartResponse::from(&*c)
    }))
}

/// Adds one unit of a product the screen already holds.
///
/// Used when the card was rendered from rows fetched outside the catalog
/// state (search results, the flash sale banner).
pub fn add_product_to_cart(cart: &CartState, product: CartProduct) -> CartResponse {
    debug!(product_id = %product.id, "add_product_to_cart command");
    cart.with_cart_mut(|c| {
        c.add_to_cart(&product);
        CartResponse::from(&*c)
    })
}

/// Changes a line's quantity by `delta`, never below 1.
pub fn update_cart_quantity(cart: &CartState, product_id: ProductId, delta: i64) -> CartResponse {
    cart.with_cart_mut(|c| {
        let changed = c.update_quantity(&product_id, delta);
        debug!(product_id = %product_id, delta, changed, "update_cart_quantity command");
        CartResponse::from(&*c)
    })
}

/// The product list's minus button: removes the line at quantity 1.
pub fn decrement_cart_item(cart: &CartState, product_id: ProductId) -> CartResponse {
    cart.with_cart_mut(|c| {
        let changed = c.decrement_or_remove(&product_id);
        debug!(product_id = %product_id, changed, "decrement_cart_item command");
        CartResponse::from(&*c)
    })
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &CartState, product_id: ProductId) -> CartResponse {
    cart.with_cart_mut(|c| {
        let changed = c.remove_from_cart(&product_id);
        debug!(product_id = %product_id, changed, "remove_from_cart command");
        CartResponse::from(&*c)
    })
}

/// Clears all lines from the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

/// Applies a replayed cart action.
pub fn apply_cart_action(cart: &CartState, action: &CartAction) -> CartResponse {
    cart.with_cart_mut(|c| {
        let changed = c.apply(action);
        debug!(?action, changed, "apply_cart_action command");
        CartResponse::from(&*c)
    })
}
