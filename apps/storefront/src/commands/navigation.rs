//! # Navigation Commands
//!
//! Commands for the animal → category → food → products drill-down.
//!
//! ## Screen Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Home grid         Category grid       Food screen        Product list  │
//! │  ┌──────────┐      ┌──────────┐        ┌──────────┐       ┌──────────┐  │
//! │  │ 🐱 🐶 🐦 🐟│ ───► │ food     │ ─────► │ dry  wet │ ────► │ cards    │  │
//! │  └──────────┘      │ clean    │ ──┐    │ kg  bag  │       │ + / −    │  │
//! │                    │ access.  │   │    └──────────┘       └──────────┘  │
//! │                    └──────────┘   └─────────────────────────────▲       │
//! │                                                                         │
//! │  Every tap ──► navigate(intent) ──► NavigationResponse                  │
//! │  Product list ──► list_products() ──► ProductCard[]                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use petpoint_core::money::Money;
use petpoint_core::navigation::{NavIntent, NavigationState, Screen};
use petpoint_core::promotions::{active_price, StockLevel};
use petpoint_core::types::{Lang, ProductId};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::state::{CartState, CatalogState, ConfigState, NavState};

/// What the screens need after every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NavigationResponse {
    pub state: NavigationState,
    /// Column form of the selected category (`"clean"`, `"dry.kilograms"`).
    pub category_key: Option<String>,
    /// False only on the home screen.
    pub can_go_back: bool,
}

impl From<NavigationState> for NavigationResponse {
    fn from(state: NavigationState) -> Self {
        NavigationResponse {
            category_key: state.selected_category.map(|key| key.to_string()),
            can_go_back: state.screen != Screen::Home,
            state,
        }
    }
}

/// A product card on the list screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub list_price: Money,
    /// Lower than `list_price` while a flash sale is running.
    pub price: Money,
    pub stock: i64,
    pub stock_level: StockLevel,
    pub stock_label: Option<String>,
    /// Units of this product already in the cart.
    pub in_cart: u32,
}

/// Applies one navigation intent.
///
/// Intents that do not fit the current screen leave the state unchanged;
/// that is logged, not reported as an error.
pub fn navigate(nav: &NavState, intent: NavIntent) -> NavigationResponse {
    let (before, after) = nav.dispatch(intent);
    debug!(
        ?intent,
        from = ?before.screen,
        to = ?after.screen,
        changed = before != after,
        "navigate command"
    );
    NavigationResponse::from(after)
}

/// Gets the current navigation state.
pub fn get_navigation(nav: &NavState) -> NavigationResponse {
    debug!("get_navigation command");
    NavigationResponse::from(nav.snapshot())
}

/// Lists the products for the current screen.
///
/// ## Returns
/// Empty unless the products screen is showing. Cards carry the flash sale
/// price, the stock badge and the in-cart count.
pub fn list_products(
    nav: &NavState,
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
    lang: Lang,
    now: DateTime<Utc>,
) -> Vec<ProductCard> {
    let Some((animal, category)) = nav.snapshot().product_filter() else {
        debug!("list_products command: not on products screen");
        return Vec::new();
    };

    let cards: Vec<ProductCard> = catalog.with_catalog(|snapshot| {
        snapshot
            .products
            .iter()
            .filter(|p| p.is_listed_under(animal, &category))
            .map(|p| {
                let level = StockLevel::classify(p.stock, config.low_stock_threshold);
                ProductCard {
                    id: p.id.clone(),
                    name: p.name.get(lang).to_string(),
                    description: p.description.get(lang).to_string(),
                    image_url: p.image_url.clone(),
                    list_price: p.price,
                    price: active_price(p, &snapshot.flash_sales, now),
                    stock: p.stock,
                    stock_level: level,
                    stock_label: level.label(lang).map(str::to_string),
                    in_cart: 0,
                }
            })
            .collect()
    });

    let cards: Vec<ProductCard> = cart.with_cart(|ledger| {
        cards
            .into_iter()
            .map(|card| ProductCard {
                in_cart: ledger.quantity_of(&card.id),
                ..card
            })
            .collect()
    });

    debug!(%animal, %category, count = cards.len(), "list_products command");
    cards
}
