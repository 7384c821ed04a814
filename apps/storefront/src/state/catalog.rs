//! # Catalog State
//!
//! The backend rows the storefront last fetched.
//!
//! The shell owns every backend call. After each fetch it hands the rows
//! over with [`CatalogState::replace`] (or patches one table with
//! [`CatalogState::update`]), and commands read them from here.

use std::sync::{Arc, Mutex, PoisonError};

use petpoint_core::analytics::Pet;
use petpoint_core::checkout::{City, Coupon};
use petpoint_core::promotions::FlashSale;
use petpoint_core::types::{Order, OrderProductRow, Product, ProductId};
use serde::{Deserialize, Serialize};

/// Rows from the backend tables. Every table is optional in JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub cities: Vec<City>,
    pub coupons: Vec<Coupon>,
    pub flash_sales: Vec<FlashSale>,
    /// Admin only.
    pub orders: Vec<Order>,
    /// Admin only.
    pub order_products: Vec<OrderProductRow>,
    /// Admin only: row count of `users_meta`.
    pub user_count: u64,
    /// Admin only.
    pub pets: Vec<Pet>,
}

impl CatalogSnapshot {
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    snapshot: Arc<Mutex<CatalogSnapshot>>,
}

impl CatalogState {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        CatalogState {
            snapshot: Arc::new(Mutex::new(snapshot)),
        }
    }

    pub fn replace(&self, snapshot: CatalogSnapshot) {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CatalogSnapshot) -> R,
    {
        let mut snapshot = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut snapshot)
    }

    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CatalogSnapshot) -> R,
    {
        let snapshot = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        f(&snapshot)
    }
}
