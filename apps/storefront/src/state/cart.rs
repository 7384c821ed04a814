//! # Cart State
//!
//! Manages the session's cart ledger.
//!
//! ## Thread Safety
//! The ledger is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may read or modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. A double-tapped "Add" must land as two units, not one
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Screen Action            Command                  Ledger Change        │
//! │  ─────────────            ───────                  ─────────────        │
//! │                                                                         │
//! │  Tap "Add" ──────────────► add_to_cart() ─────────► qty + 1 / push     │
//! │                                                                         │
//! │  Tap + / − ──────────────► update_cart_quantity() ► max(1, qty + d)    │
//! │                                                                         │
//! │  Tap − on product list ──► decrement_cart_item() ─► qty − 1 / remove   │
//! │                                                                         │
//! │  Tap trash ──────────────► remove_from_cart() ────► line removed       │
//! │                                                                         │
//! │  Order placed ───────────► clear_cart() ──────────► empty              │
//! │                                                                         │
//! │  NOTE: All write operations acquire the Mutex lock exclusively.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use petpoint_core::cart::CartLedger;
use petpoint_core::money::Money;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Cart totals summary for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    pub subtotal: Money,
}

impl From<&CartLedger> for CartTotals {
    fn from(cart: &CartLedger) -> Self {
        CartTotals {
            item_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

/// Session cart state.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<CartLedger>>` because:
/// - `Arc`: clones handed to the shell share one ledger
/// - `Mutex`: Ensures only one command modifies the cart at a time
///
/// ## Why Not RwLock?
/// Cart operations are quick, and most of them write.
/// A RwLock would add complexity with minimal benefit.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<CartLedger>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|c| CartTotals::from(c));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartLedger) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let changed = cart_state.with_cart_mut(|cart| cart.remove_from_cart(&id));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartLedger) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// Copy of the current ledger.
    pub fn snapshot(&self) -> CartLedger {
        self.with_cart(CartLedger::clone)
    }
}
