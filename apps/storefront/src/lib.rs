//! # PetPoint Storefront Library
//!
//! Session controller for the PetPoint mobile storefront. The React Native
//! screens call into these commands; everything they return is JSON.
//!
//! ## Module Organization
//! ```text
//! petpoint_storefront/
//! ├── lib.rs          ◄─── You are here (tracing setup, Storefront bundle)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── nav.rs      ◄─── Navigation state
//! │   ├── cart.rs     ◄─── Cart state management
//! │   ├── catalog.rs  ◄─── Rows fetched by the shell
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── navigation.rs
//! │   ├── cart.rs
//! │   ├── checkout.rs
//! │   └── admin.rs
//! ├── replay.rs       ◄─── Session scripts for petpoint-replay
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management
//! One focused state type per concern, so each command asks only for what
//! it touches:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront                                        │
//! │                                                                         │
//! │  ┌────────────┐ ┌────────────┐ ┌────────────────┐ ┌────────────────┐  │
//! │  │  NavState  │ │ CartState  │ │  CatalogState  │ │  ConfigState   │  │
//! │  │            │ │            │ │                │ │                │  │
//! │  │ • screen   │ │ • lines    │ │ • products     │ │ • store name   │  │
//! │  │ • animal   │ │ • totals   │ │ • cities       │ │ • currency     │  │
//! │  │ • category │ │            │ │ • coupons      │ │ • thresholds   │  │
//! │  │ • food sel │ │            │ │ • sales/orders │ │                │  │
//! │  └────────────┘ └────────────┘ └────────────────┘ └────────────────┘  │
//! │                                                                         │
//! │  Each wraps Arc<Mutex<_>>; clones share the same session.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod replay;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{CartState, CatalogState, ConfigState, NavState};

/// Every piece of session state, handed to the shell once at startup.
#[derive(Debug, Clone, Default)]
pub struct Storefront {
    pub nav: NavState,
    pub cart: CartState,
    pub catalog: CatalogState,
    pub config: ConfigState,
}

impl Storefront {
    /// Fresh session: home screen, empty cart, empty catalog.
    pub fn new(config: ConfigState) -> Self {
        Storefront {
            nav: NavState::new(),
            cart: CartState::new(),
            catalog: CatalogState::default(),
            config,
        }
    }

    /// Fresh session configured from `PETPOINT_*` environment variables.
    pub fn from_env() -> Self {
        let config = ConfigState::from_env();
        info!(store = %config.store_name, lang = ?config.default_lang, "storefront configured");
        Self::new(config)
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=petpoint=trace` - Show trace for petpoint crates only
/// - Default: INFO, DEBUG for petpoint
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,petpoint=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
