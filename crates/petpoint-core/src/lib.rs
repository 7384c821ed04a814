//! # petpoint-core: Pure Storefront Logic for PetPoint
//!
//! PetPoint is a bilingual (English/Arabic) pet-supplies storefront. The
//! hosted backend owns the tables; this crate owns every decision the client
//! makes about them, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PetPoint Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (React Native)                     │   │
//! │  │   Home ──► Category ──► Food Sub ──► Products ──► Cart          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (session controller)            │   │
//! │  │         NavState • CartState • ConfigState • ApiError           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ petpoint-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  navigation   cart   checkout   promotions   analytics          │   │
//! │  │  money        types  validation error                           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO BACKEND • NO CLOCK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`navigation`] - Animal → category → food sub → products state machine
//! - [`cart`] - In-session cart ledger
//! - [`checkout`] - Delivery zones, coupons, quotes, order drafts
//! - [`promotions`] - Flash sale windows and stock badges
//! - [`analytics`] - Admin report aggregation
//! - [`types`] - Catalog and order rows
//! - [`money`] - Integer dinar amounts
//! - [`validation`] - Form and checkout rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use petpoint_core::cart::{CartLedger, CartProduct};
//! use petpoint_core::money::Money;
//!
//! let mut cart = CartLedger::new();
//! let kibble = CartProduct::new("1", "Kibble", Money::from_dinars(1000));
//!
//! cart.add_to_cart(&kibble);
//! cart.add_to_cart(&kibble);
//!
//! assert_eq!(cart.quantity_of(&"1".into()), 2);
//! assert_eq!(cart.total(Money::from_dinars(3000)).dinars(), 5000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod navigation;
pub mod promotions;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartAction, CartLedger, CartLine, CartProduct};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use navigation::{NavIntent, NavigationState, Screen};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines accepted at checkout.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line accepted at checkout.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Stock below this count shows the "almost sold out" badge.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// How many products the "most purchased" report lists.
pub const TOP_PRODUCTS_LIMIT: usize = 3;

/// Look-back window, in days, for the "top customer this week" report.
pub const TOP_CUSTOMER_WINDOW_DAYS: i64 = 7;
