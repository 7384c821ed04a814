//! # Storefront Commands Module
//!
//! All commands exposed to the React Native screens.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── navigation.rs  ◄─── Drill-down transitions, product list
//! ├── cart.rs        ◄─── Cart manipulation
//! ├── checkout.rs    ◄─── Quote, cities, place order
//! └── admin.rs       ◄─── Reports, pet of the week, order status
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Screen                                                                 │
//! │  ──────                                                                 │
//! │  const cart = await storefront.addToCart({ productId: 42 });           │
//! │         │                                                               │
//! │         │ (native bridge, JSON)                                         │
//! │         ▼                                                               │
//! │  Rust                                                                   │
//! │  ────                                                                   │
//! │  fn add_to_cart(                                                        │
//! │      catalog: &CatalogState,  ◄── Session state                        │
//! │      cart: &CartState,        ◄── Session state                        │
//! │      product_id: ProductId,   ◄── From the call params                 │
//! │      now: DateTime<Utc>,      ◄── Clock read by the caller             │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Screen receives: CartResponse                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs navigation
//! fn navigate(nav: &NavState, intent: NavIntent)
//!
//! // Only needs cart
//! fn get_cart(cart: &CartState)
//!
//! // Needs cart, catalog and config
//! fn place_order(cart: &CartState, catalog: &CatalogState, config: &ConfigState, ...)
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod navigation;
