//! # State Module
//!
//! Session state held by the storefront between commands.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. This approach:
//!
//! 1. **Clearer Command Signatures**: Commands declare exactly what state they need
//! 2. **Easier Testing**: Each holder can be built on its own
//! 3. **Reduced Contention**: Navigating never waits on a checkout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐  ┌─────────────┐   │
//! │  │   NavState   │  │  CartState   │  │ ConfigState │  │CatalogState │   │
//! │  │              │  │              │  │             │  │             │   │
//! │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │ store_name  │  │ products    │   │
//! │  │  Navigation  │  │  CartLedger  │  │ currency    │  │ cities      │   │
//! │  │  State>>     │  │  >>          │  │ thresholds  │  │ coupons ... │   │
//! │  └──────────────┘  └──────────────┘  └─────────────┘  └─────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • NavState / CartState: one transition at a time under the Mutex      │
//! │  • ConfigState: Read-only after initialization                         │
//! │  • CatalogState: swapped whole when the shell refetches rows           │
//! │  • A poisoned lock is recovered; the guarded value is always valid     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod nav;

pub use cart::{CartState, CartTotals};
pub use catalog::{CatalogSnapshot, CatalogState};
pub use config::ConfigState;
pub use nav::NavState;
