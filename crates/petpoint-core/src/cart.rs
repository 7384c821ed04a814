//! # Cart Ledger
//!
//! The in-session list of items the customer intends to buy.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Screen Action            Ledger Call              Ledger Change        │
//! │  ─────────────            ───────────              ─────────────        │
//! │                                                                         │
//! │  "Add to Cart" ──────────► add_to_cart() ────────► push or qty + 1     │
//! │                                                                         │
//! │  Cart  + / - ────────────► update_quantity(±1) ──► qty = max(1, q + d) │
//! │                                                                         │
//! │  Product list - ─────────► decrement_or_remove() ► qty - 1, or remove  │
//! │                                                    when qty was 1      │
//! │                                                                         │
//! │  "Remove" ───────────────► remove_from_cart() ───► line removed        │
//! │                                                                         │
//! │  Order placed ───────────► clear() ──────────────► empty               │
//! │                                                                         │
//! │  NOTE: Unknown ids are ignored. Mutators return whether anything       │
//! │        changed instead of failing.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot at First Add
//! A line keeps the name, image and price it was created with. Adding the
//! same product again only bumps the quantity, even if the catalog row has
//! changed in between.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{LocalizedText, OrderLine, Product, ProductId};

// =============================================================================
// Cart Product
// =============================================================================

/// What a product card hands to "Add to Cart".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: LocalizedText,
    pub image: Option<String>,
    pub price: Money,
}

impl CartProduct {
    /// Convenience constructor with the same name in both languages.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        CartProduct {
            id: id.into(),
            name: LocalizedText::same(name),
            image: None,
            price,
        }
    }

    /// Card for a catalog row, priced at `price` (list or flash-sale price).
    pub fn from_product(product: &Product, price: Money) -> Self {
        CartProduct {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.image_url.clone(),
            price,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Unique within the ledger.
    pub id: ProductId,
    pub name: LocalizedText,
    pub image: Option<String>,
    pub unit_price: Money,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn from_product(product: &CartProduct) -> Self {
        CartLine {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// unit price × quantity
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Freezes this line into an order `items` entry.
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            id: self.id.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            price: self.unit_price,
            image: self.image.clone(),
        }
    }
}

// =============================================================================
// Cart Ledger
// =============================================================================

/// Ordered cart lines.
///
/// ## Invariants
/// - At most one line per product id
/// - Every quantity is ≥ 1
/// - Existing lines keep their position; new lines append
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        CartLedger { lines: Vec::new() }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Already in cart: quantity + 1, stored fields untouched
    /// - Not in cart: appended with quantity 1
    ///
    /// Each call adds exactly one unit, so a double tap adds two.
    pub fn add_to_cart(&mut self, product: &CartProduct) {
        match self.line_mut(&product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::from_product(product)),
        }
    }

    /// Shifts a line's quantity by `delta`, never below 1.
    ///
    /// Driving the quantity to 0 or below floors it at 1 rather than
    /// removing the line; use [`Self::remove_from_cart`] or
    /// [`Self::decrement_or_remove`] for that.
    ///
    /// ## Returns
    /// `false` when `id` is not in the cart (nothing changes).
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> bool {
        let Some(line) = self.line_mut(id) else {
            return false;
        };

        let next = (line.quantity as i64).saturating_add(delta).max(1);
        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        true
    }

    /// The product list's minus button: removes the line when its quantity
    /// is 1, otherwise takes one unit off.
    pub fn decrement_or_remove(&mut self, id: &ProductId) -> bool {
        match self.quantity_of(id) {
            0 => false,
            1 => self.remove_from_cart(id),
            _ => self.update_quantity(id, -1),
        }
    }

    /// Deletes the line for `id`.
    ///
    /// ## Returns
    /// `false` when `id` is not in the cart (nothing changes).
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.id != id);
        self.lines.len() != before
    }

    /// Empties the ledger.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Applies a single cart action.
    pub fn apply(&mut self, action: &CartAction) -> bool {
        match action {
            CartAction::Add { product } => {
                self.add_to_cart(product);
                true
            }
            CartAction::UpdateQuantity { id, delta } => self.update_quantity(id, *delta),
            CartAction::DecrementOrRemove { id } => self.decrement_or_remove(id),
            CartAction::Remove { id } => self.remove_from_cart(id),
            CartAction::Clear => {
                let changed = !self.is_empty();
                self.clear();
                changed
            }
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Units of `id` in the cart, 0 when absent (the "In Cart" badge).
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.line(id).map_or(0, |line| line.quantity)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    ///
    /// Widened to u64: a single line may sit at `u32::MAX`.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Subtotal plus the delivery fee of the chosen city.
    pub fn total(&self, delivery_fee: Money) -> Money {
        self.subtotal() + delivery_fee
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.id == id)
    }
}

// =============================================================================
// Cart Actions
// =============================================================================

/// A cart mutation, replayable from JSON like [`crate::NavIntent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum CartAction {
    Add { product: CartProduct },
    UpdateQuantity { id: ProductId, delta: i64 },
    DecrementOrRemove { id: ProductId },
    Remove { id: ProductId },
    Clear,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> CartProduct {
        CartProduct::new(id, format!("Product {}", id), Money::from_dinars(price))
    }

    #[test]
    fn test_add_twice_increments() {
        let mut cart = CartLedger::new();
        let item = product("1", 1000);

        cart.add_to_cart(&item);
        cart.add_to_cart(&item);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(&"1".into()), 2);
    }

    #[test]
    fn test_update_quantity_floors_at_one() {
        let mut cart = CartLedger::new();
        let item = product("1", 1000);
        cart.add_to_cart(&item);
        cart.add_to_cart(&item);

        assert!(cart.update_quantity(&"1".into(), -5));
        assert_eq!(cart.quantity_of(&"1".into()), 1);
        assert_eq!(cart.line_count(), 1);

        assert!(cart.update_quantity(&"1".into(), 3));
        assert_eq!(cart.quantity_of(&"1".into()), 4);
    }

    #[test]
    fn test_remove_empties_cart() {
        let mut cart = CartLedger::new();
        cart.add_to_cart(&product("1", 1000));

        assert!(cart.remove_from_cart(&"1".into()));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_id_leaves_ledger_unchanged() {
        let mut cart = CartLedger::new();
        cart.add_to_cart(&product("1", 1000));
        let before = cart.clone();

        assert!(!cart.update_quantity(&"99".into(), 1));
        assert!(!cart.remove_from_cart(&"99".into()));
        assert!(!cart.decrement_or_remove(&"99".into()));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_totals() {
        let mut cart = CartLedger::new();
        let a = product("a", 1000);
        let b = product("b", 500);
        cart.add_to_cart(&a);
        cart.add_to_cart(&a);
        for _ in 0..3 {
            cart.add_to_cart(&b);
        }

        assert_eq!(cart.subtotal().dinars(), 3500);
        assert_eq!(cart.total(Money::from_dinars(3000)).dinars(), 6500);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_huge_delta_saturates_totals() {
        let mut cart = CartLedger::new();
        cart.add_to_cart(&product("1", 1000));
        assert!(cart.update_quantity(&"1".into(), i64::MAX));
        cart.add_to_cart(&product("2", 500));

        assert_eq!(cart.quantity_of(&"1".into()), u32::MAX);
        assert_eq!(cart.total_quantity(), u64::from(u32::MAX) + 1);
        assert_eq!(cart.subtotal().dinars(), 1000 * i64::from(u32::MAX) + 500);
        assert_eq!(cart.total(Money::from_dinars(i64::MAX)).dinars(), i64::MAX);

        assert!(cart.update_quantity(&"1".into(), i64::MIN));
        assert_eq!(cart.quantity_of(&"1".into()), 1);
    }

    #[test]
    fn test_repeat_add_keeps_first_snapshot() {
        let mut cart = CartLedger::new();
        cart.add_to_cart(&product("1", 1000));

        let mut repriced = product("1", 1200);
        repriced.name = LocalizedText::same("Renamed");
        cart.add_to_cart(&repriced);

        let line = cart.line(&"1".into()).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price.dinars(), 1000);
        assert_eq!(line.name.en, "Product 1");
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let mut cart = CartLedger::new();
        cart.add_to_cart(&product("b", 1));
        cart.add_to_cart(&product("a", 1));
        cart.add_to_cart(&product("b", 1));
        cart.add_to_cart(&product("c", 1));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_decrement_or_remove() {
        let mut cart = CartLedger::new();
        let item = product("1", 1000);
        cart.add_to_cart(&item);
        cart.add_to_cart(&item);

        assert!(cart.decrement_or_remove(&"1".into()));
        assert_eq!(cart.quantity_of(&"1".into()), 1);

        assert!(cart.decrement_or_remove(&"1".into()));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_apply_actions() {
        let mut cart = CartLedger::new();
        let actions: Vec<CartAction> = serde_json::from_str(
            r#"[
                {"type":"add","product":{"id":1,"name":{"en":"Kibble","ar":"طعام"},"image":null,"price":1000}},
                {"type":"updateQuantity","id":"1","delta":2},
                {"type":"remove","id":"2"}
            ]"#,
        )
        .unwrap();

        let changed: Vec<bool> = actions.iter().map(|a| cart.apply(a)).collect();
        assert_eq!(changed, [true, true, false]);
        assert_eq!(cart.quantity_of(&"1".into()), 3);

        assert!(cart.apply(&CartAction::Clear));
        assert!(!cart.apply(&CartAction::Clear));
    }

    #[test]
    fn test_to_order_line() {
        let mut cart = CartLedger::new();
        cart.add_to_cart(&product("1", 750));
        cart.update_quantity(&"1".into(), 1);

        let line = cart.lines()[0].to_order_line();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total().dinars(), 1500);
    }
}
