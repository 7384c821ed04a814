//! # Session Replay
//!
//! Re-runs a recorded session against fresh state, to reproduce what a
//! customer saw.
//!
//! ## Script Format
//! ```json
//! {
//!   "catalog": { "products": [], "cities": [] },
//!   "steps": [
//!     { "kind": "nav",  "intent": { "type": "goCategory", "animal": "cats" } },
//!     { "kind": "cart", "action": { "type": "add", "product": { "id": 1, "name": { "en": "Kibble", "ar": "" }, "image": null, "price": 1000 } } },
//!     { "kind": "addToCart", "productId": 7 },
//!     { "kind": "quote", "city": "Baghdad" }
//!   ]
//! }
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use petpoint_core::cart::CartAction;
use petpoint_core::navigation::NavIntent;
use petpoint_core::types::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::commands::cart::{add_to_cart, apply_cart_action, CartResponse};
use crate::commands::checkout::{quote_checkout, QuoteResponse};
use crate::commands::navigation::{navigate, NavigationResponse};
use crate::error::ApiError;
use crate::state::CatalogSnapshot;
use crate::Storefront;

/// Failures loading a script. Failing steps are recorded, not raised.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A recorded session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayScript {
    /// Rows loaded before the first step.
    #[serde(default)]
    pub catalog: CatalogSnapshot,
    /// Clock for steps that need one. Defaults to the time of the run.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    pub steps: Vec<ReplayStep>,
}

/// One recorded interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReplayStep {
    Nav {
        intent: NavIntent,
    },
    Cart {
        action: CartAction,
    },
    #[serde(rename_all = "camelCase")]
    AddToCart {
        product_id: ProductId,
    },
    #[serde(rename_all = "camelCase")]
    Quote {
        #[serde(default)]
        city: Option<String>,
        #[serde(default)]
        coupon_code: Option<String>,
    },
}

/// A step that returned an error.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepFailure {
    /// 0-based position in `steps`.
    pub step: usize,
    pub error: ApiError,
}

/// Final state after the last step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySnapshot {
    pub steps: usize,
    pub navigation: NavigationResponse,
    pub cart: CartResponse,
    /// The last quote step's result, if any succeeded.
    pub quote: Option<QuoteResponse>,
    pub failures: Vec<StepFailure>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a script from `path`, or stdin when `path` is `-`.
    pub fn load(path: &str) -> Result<Self, ReplayError> {
        let read_err = |source| ReplayError::Read {
            path: path.to_string(),
            source,
        };

        let json = if path == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(read_err)?;
            buf
        } else {
            fs::read_to_string(Path::new(path)).map_err(read_err)?
        };
        Self::from_json(&json)
    }
}

/// Runs every step against `storefront`, whose catalog is replaced by the
/// script's.
pub fn run_script(
    storefront: &Storefront,
    script: ReplayScript,
    now: DateTime<Utc>,
) -> ReplaySnapshot {
    let now = script.now.unwrap_or(now);
    storefront.catalog.replace(script.catalog);

    let mut quote = None;
    let mut failures = Vec::new();
    let steps = script.steps.len();

    for (i, step) in script.steps.into_iter().enumerate() {
        debug!(step = i, ?step, "replaying");
        let result = match step {
            ReplayStep::Nav { intent } => {
                navigate(&storefront.nav, intent);
                Ok(())
            }
            ReplayStep::Cart { action } => {
                apply_cart_action(&storefront.cart, &action);
                Ok(())
            }
            ReplayStep::AddToCart { product_id } => {
                add_to_cart(&storefront.catalog, &storefront.cart, product_id, now).map(|_| ())
            }
            ReplayStep::Quote { city, coupon_code } => quote_checkout(
                &storefront.cart,
                &storefront.catalog,
                &storefront.config,
                city.as_deref(),
                coupon_code.as_deref(),
                now,
            )
            .map(|q| quote = Some(q)),
        };

        if let Err(error) = result {
            warn!(step = i, error = %error, "replay step failed");
            failures.push(StepFailure { step: i, error });
        }
    }

    ReplaySnapshot {
        steps,
        navigation: crate::commands::navigation::get_navigation(&storefront.nav),
        cart: crate::commands::cart::get_cart(&storefront.cart),
        quote,
        failures,
    }
}
