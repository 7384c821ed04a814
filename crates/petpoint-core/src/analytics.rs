//! # Analytics
//!
//! Aggregations behind the admin analytics and "pet of the week" panels.
//!
//! ## Report Inputs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  users_meta ── count ─────────────────────────────┐                     │
//! │  orders ────── count, Σ total ────────────────────┤                     │
//! │  orders_products ── Σ qty per product ── top N ───┼──► AnalyticsSummary │
//! │  orders in window ── count per user ── best ──────┘                     │
//! │                                                                         │
//! │  orders in ISO week ── best user ── their pets ──► CustomerOfTheWeek    │
//! │  picked pet + messages ──────────────────────────► PetOfTheWeek         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ties always resolve to whichever key was seen first in the input, so a
//! report is stable for a given row order.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Lang, LocalizedText, Order, OrderProductRow, Product, ProductId};
use crate::validation::normalize_localized;

// =============================================================================
// Report Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopProduct {
    /// 1-based.
    pub rank: u32,
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopCustomer {
    pub user_id: String,
    pub order_count: u64,
}

/// Everything the analytics panel shows.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AnalyticsSummary {
    pub users: u64,
    pub orders: u64,
    pub revenue: Money,
    pub top_products: Vec<TopProduct>,
    pub top_customer: Option<TopCustomer>,
    #[ts(as = "(String, String)")]
    pub customer_window: (NaiveDate, NaiveDate),
}

/// A row from the `pets` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Pet {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub image_url: Option<String>,
}

/// What the "pet of the week" panel offers the admin to pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerOfTheWeek {
    /// Monday and Sunday of the current ISO week.
    #[ts(as = "(String, String)")]
    pub week: (NaiveDate, NaiveDate),
    pub customer: Option<TopCustomer>,
    /// The customer's pets; empty when there is no customer.
    pub pets: Vec<Pet>,
}

/// Draft of the `pet_of_the_week` row. The backend upserts on
/// `(week_start, week_end)`, so saving twice in a week replaces the pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PetOfTheWeek {
    pub pet_id: String,
    #[ts(as = "String")]
    pub week_start: NaiveDate,
    #[ts(as = "String")]
    pub week_end: NaiveDate,
    /// `message_en` / `message_ar` columns. Both may be empty.
    pub message: LocalizedText,
}

impl PetOfTheWeek {
    /// Drafts the row for a pet the admin picked off `candidates`.
    ///
    /// ## Rules
    /// - The pet must belong to this week's top customer
    /// - Messages are trimmed; one missing translation copies the other
    pub fn draft(
        candidates: &CustomerOfTheWeek,
        pet_id: &str,
        message: &LocalizedText,
    ) -> Result<PetOfTheWeek, ValidationError> {
        let pet = candidates
            .pets
            .iter()
            .find(|p| p.id == pet_id.trim())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "pet".to_string(),
                allowed: candidates.pets.iter().map(|p| p.id.clone()).collect(),
            })?;

        Ok(PetOfTheWeek {
            pet_id: pet.id.clone(),
            week_start: candidates.week.0,
            week_end: candidates.week.1,
            message: normalize_localized("message", message).unwrap_or_default(),
        })
    }
}

// =============================================================================
// Aggregations
// =============================================================================

/// Sum of order totals. Every status counts, cancelled included.
pub fn revenue(orders: &[Order]) -> Money {
    orders.iter().map(|o| o.total).sum()
}

/// Sums `values` per key, keeping keys in first-seen order.
fn tally<K, I>(entries: I) -> Vec<(K, u64)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, u64)>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut totals: Vec<(K, u64)> = Vec::new();

    for (key, value) in entries {
        match index.get(&key) {
            Some(&i) => totals[i].1 += value,
            None => {
                index.insert(key.clone(), totals.len());
                totals.push((key, value));
            }
        }
    }
    totals
}

/// Most purchased products by summed quantity.
///
/// ## Rules
/// - Quantities are summed per product id across all rows
/// - Highest first; equal totals keep first-seen order
/// - Name comes from the catalog in `lang`, else `"ID <id>"`
pub fn top_products(
    rows: &[OrderProductRow],
    products: &[Product],
    limit: usize,
    lang: Lang,
) -> Vec<TopProduct> {
    let mut totals = tally(
        rows.iter()
            .map(|row| (row.product_id.clone(), u64::from(row.quantity))),
    );
    // Stable sort keeps first-seen order among ties.
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    totals
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (product_id, quantity))| {
            let name = products
                .iter()
                .find(|p| p.id == product_id)
                .map(|p| p.name.get(lang).to_string())
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| format!("ID {product_id}"));

            TopProduct {
                rank: i as u32 + 1,
                product_id,
                name,
                quantity,
            }
        })
        .collect()
}

/// Signed-in customer with the most orders placed between `from` and `to`
/// (both dates inclusive).
pub fn top_customer(orders: &[Order], from: NaiveDate, to: NaiveDate) -> Option<TopCustomer> {
    let in_window = orders.iter().filter_map(|o| {
        let day = o.created_at.date_naive();
        let user = o.user_id.as_deref().filter(|u| !u.is_empty())?;
        (from <= day && day <= to).then(|| (user.to_string(), 1u64))
    });

    tally(in_window)
        .into_iter()
        // max_by_key returns the last max; fold keeps the first.
        .fold(None::<(String, u64)>, |best, (user, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((user, count)),
        })
        .map(|(user_id, order_count)| TopCustomer {
            user_id,
            order_count,
        })
}

/// The `days`-long window ending on `today`.
///
/// A window reaching past the earliest representable date starts there.
pub fn rolling_window(today: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    let start = Duration::try_days(days)
        .and_then(|span| today.checked_sub_signed(span))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

/// Monday through Sunday of the ISO week containing `today`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use petpoint_core::analytics::iso_week_range;
///
/// // 2024-05-01 is a Wednesday
/// let (mon, sun) = iso_week_range(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
/// assert_eq!(mon.to_string(), "2024-04-29");
/// assert_eq!(sun.to_string(), "2024-05-05");
/// ```
pub fn iso_week_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = Duration::days(i64::from(today.weekday().num_days_from_monday()));
    let monday = today.checked_sub_signed(offset).unwrap_or(NaiveDate::MIN);
    let sunday = monday.checked_add_signed(Duration::days(6)).unwrap_or(NaiveDate::MAX);
    (monday, sunday)
}

/// This ISO week's top customer and their pets.
pub fn customer_of_the_week(orders: &[Order], pets: &[Pet], today: NaiveDate) -> CustomerOfTheWeek {
    let week = iso_week_range(today);
    let customer = top_customer(orders, week.0, week.1);
    let pets = customer
        .as_ref()
        .map(|c| {
            pets.iter()
                .filter(|p| p.user_id == c.user_id)
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    CustomerOfTheWeek {
        week,
        customer,
        pets,
    }
}

/// Knobs for [`summarize`].
#[derive(Debug, Clone, Copy)]
pub struct SummaryOptions {
    pub today: NaiveDate,
    pub top_products: usize,
    pub customer_window_days: i64,
    pub lang: Lang,
}

/// Builds the analytics panel from already-fetched rows.
pub fn summarize(
    user_count: u64,
    orders: &[Order],
    rows: &[OrderProductRow],
    products: &[Product],
    options: SummaryOptions,
) -> AnalyticsSummary {
    let window = rolling_window(options.today, options.customer_window_days);

    AnalyticsSummary {
        users: user_count,
        orders: orders.len() as u64,
        revenue: revenue(orders),
        top_products: top_products(rows, products, options.top_products, options.lang),
        top_customer: top_customer(orders, window.0, window.1),
        customer_window: window,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
