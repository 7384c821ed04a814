//! # Admin Commands
//!
//! Reports for the admin panels, plus the drafts the shell writes back.
//! Writing rows is the backend's job; these aggregate what the shell
//! fetched and check an edit before the shell sends it.

use chrono::{DateTime, NaiveDate, Utc};
use petpoint_core::analytics::{
    self, summarize, AnalyticsSummary, CustomerOfTheWeek, PetOfTheWeek, SummaryOptions,
};
use petpoint_core::checkout::{Coupon, CouponStatus};
use petpoint_core::promotions::{
    expired_sale_ids, low_stock, sale_board, SaleBoardEntry, StockLevel,
};
use petpoint_core::types::{Lang, LocalizedText, Order, OrderStatus, ProductId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState};

/// One row of the low stock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LowStockEntry {
    pub product_id: ProductId,
    pub name: String,
    pub stock: i64,
    pub level: StockLevel,
}

/// The flash sale panel.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FlashSaleBoard {
    pub entries: Vec<SaleBoardEntry>,
    /// Sales past their end, for the shell to delete.
    pub expired_ids: Vec<String>,
}

/// One row of the coupon panel.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CouponBoardEntry {
    pub coupon: Coupon,
    pub status: CouponStatus,
    /// "3 / 10"
    pub usage: String,
}

/// Counts, revenue, most purchased products and the top customer.
pub fn analytics_summary(
    catalog: &CatalogState,
    config: &ConfigState,
    today: NaiveDate,
    lang: Lang,
) -> AnalyticsSummary {
    let options = SummaryOptions {
        today,
        top_products: config.top_products,
        customer_window_days: config.top_customer_days,
        lang,
    };

    let summary = catalog.with_catalog(|s| {
        summarize(s.user_count, &s.orders, &s.order_products, &s.products, options)
    });
    debug!(
        orders = summary.orders,
        revenue = summary.revenue.dinars(),
        "analytics_summary command"
    );
    summary
}

/// Products below the configured threshold, lowest stock first.
pub fn low_stock_report(
    catalog: &CatalogState,
    config: &ConfigState,
    lang: Lang,
) -> Vec<LowStockEntry> {
    let threshold = config.low_stock_threshold;
    let report: Vec<LowStockEntry> = catalog.with_catalog(|s| {
        low_stock(&s.products, threshold)
            .into_iter()
            .map(|p| LowStockEntry {
                product_id: p.id.clone(),
                name: p.name.get(lang).to_string(),
                stock: p.stock,
                level: StockLevel::classify(p.stock, threshold),
            })
            .collect()
    });
    debug!(threshold, count = report.len(), "low_stock_report command");
    report
}

/// Flash sales newest first, with countdowns and the ids to prune.
pub fn flash_sale_board(
    catalog: &CatalogState,
    config: &ConfigState,
    now: DateTime<Utc>,
    lang: Lang,
) -> FlashSaleBoard {
    let board = catalog.with_catalog(|s| FlashSaleBoard {
        entries: sale_board(&s.flash_sales, &s.products, now, lang, config.low_stock_threshold),
        expired_ids: expired_sale_ids(&s.flash_sales, now),
    });
    debug!(
        sales = board.entries.len(),
        expired = board.expired_ids.len(),
        "flash_sale_board command"
    );
    board
}

/// Coupons with their status on `today`.
pub fn coupon_board(catalog: &CatalogState, today: NaiveDate) -> Vec<CouponBoardEntry> {
    debug!(%today, "coupon_board command");
    catalog.with_catalog(|s| {
        s.coupons
            .iter()
            .map(|coupon| CouponBoardEntry {
                status: coupon.status(today),
                usage: format!("{} / {}", coupon.used_count, coupon.usage_limit),
                coupon: coupon.clone(),
            })
            .collect()
    })
}

/// This ISO week's top customer and the pets the admin can pick from.
pub fn customer_of_the_week(catalog: &CatalogState, today: NaiveDate) -> CustomerOfTheWeek {
    let week = catalog.with_catalog(|s| {
        analytics::customer_of_the_week(&s.orders, &s.pets, today)
    });
    debug!(
        %today,
        customer = week.customer.as_ref().map(|c| c.user_id.as_str()),
        pets = week.pets.len(),
        "customer_of_the_week command"
    );
    week
}

/// Drafts the `pet_of_the_week` row for the pet the admin picked.
///
/// ## Errors
/// `VALIDATION_ERROR` when the pet is not one of this week's candidates.
pub fn draft_pet_of_the_week(
    catalog: &CatalogState,
    today: NaiveDate,
    pet_id: &str,
    message: &LocalizedText,
) -> Result<PetOfTheWeek, ApiError> {
    let candidates = customer_of_the_week(catalog, today);
    let draft = PetOfTheWeek::draft(&candidates, pet_id, message)?;
    info!(pet_id = %draft.pet_id, week_start = %draft.week_start, "Pet of the week drafted");
    Ok(draft)
}

/// Changes an order's status in the fetched rows and returns the order
/// for the shell to write back.
///
/// ## Errors
/// - `NOT_FOUND` when the order is not in the last fetch
/// - `VALIDATION_ERROR` when the order is already delivered or cancelled
pub fn update_order_status(
    catalog: &CatalogState,
    order_id: &str,
    status: OrderStatus,
) -> Result<Order, ApiError> {
    let order = catalog.update(|s| {
        let order = s
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| ApiError::not_found("Order", order_id))?;
        order.status = order.status.transition_to(status)?;
        Ok::<_, ApiError>(order.clone())
    })?;

    info!(order_id, status = status.key(), "Order status updated");
    Ok(order)
}
