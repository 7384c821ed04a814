//! # Configuration State
//!
//! Stores storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PETPOINT_*`)
//! 2. Defaults (this file)
//!
//! A variable that is set but does not parse is ignored with a warning and
//! the default stays in place.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use petpoint_core::money::{group_thousands, Money};
use petpoint_core::types::Lang;
use petpoint_core::{LOW_STOCK_THRESHOLD, TOP_CUSTOMER_WINDOW_DAYS, TOP_PRODUCTS_LIMIT};
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

/// Longest look-back the top customer report accepts (ten years).
const MAX_TOP_CUSTOMER_DAYS: i64 = 3650;

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ConfigState {
    /// Shown in the header and on the admin panel
    pub store_name: String,

    /// Currency code appended to every amount
    pub currency_code: String,

    /// Language the session starts in
    pub default_lang: Lang,

    /// Stock below this shows "almost sold out" and lands on the low stock report
    pub low_stock_threshold: i64,

    /// How many products the "most purchased" report lists
    pub top_products: usize,

    /// Look-back window for the top customer report
    pub top_customer_days: i64,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "PetPoint"
    /// - Currency: IQD
    /// - Language: English
    /// - Low stock: below 5
    /// - Top products: 3
    /// - Top customer window: 7 days
    fn default() -> Self {
        ConfigState {
            store_name: "PetPoint".to_string(),
            currency_code: "IQD".to_string(),
            default_lang: Lang::En,
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            top_products: TOP_PRODUCTS_LIMIT,
            top_customer_days: TOP_CUSTOMER_WINDOW_DAYS,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `PETPOINT_STORE_NAME`: Override store name
    /// - `PETPOINT_CURRENCY`: Override currency code
    /// - `PETPOINT_LANG`: `en` or `ar`
    /// - `PETPOINT_LOW_STOCK_THRESHOLD`: e.g. "5"
    /// - `PETPOINT_TOP_PRODUCTS`: e.g. "3"
    /// - `PETPOINT_TOP_CUSTOMER_DAYS`: e.g. "7"
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] over any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("PETPOINT_STORE_NAME").filter(|v| !v.trim().is_empty()) {
            config.store_name = store_name.trim().to_string();
        }

        if let Some(currency) = lookup("PETPOINT_CURRENCY").filter(|v| !v.trim().is_empty()) {
            config.currency_code = currency.trim().to_uppercase();
        }

        if let Some(lang) = parse_var(&lookup, "PETPOINT_LANG") {
            config.default_lang = lang;
        }

        if let Some(threshold) = parse_var(&lookup, "PETPOINT_LOW_STOCK_THRESHOLD") {
            config.low_stock_threshold = threshold;
        }

        if let Some(limit) = parse_var::<usize, _>(&lookup, "PETPOINT_TOP_PRODUCTS") {
            if limit > 0 {
                config.top_products = limit;
            }
        }

        if let Some(days) = parse_var::<i64, _>(&lookup, "PETPOINT_TOP_CUSTOMER_DAYS") {
            if (1..=MAX_TOP_CUSTOMER_DAYS).contains(&days) {
                config.top_customer_days = days;
            } else {
                warn!(
                    days,
                    max = MAX_TOP_CUSTOMER_DAYS,
                    "ignoring out-of-range top customer window"
                );
            }
        }

        config
    }

    /// Formats an amount with thousands separators and the currency code.
    ///
    /// ## Example
    /// ```rust
    /// use petpoint_core::money::Money;
    /// use petpoint_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_dinars(6500)), "6,500 IQD");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!("{} {}", group_thousands(amount.dinars()), self.currency_code)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable config value");
            None
        }
    }
}
