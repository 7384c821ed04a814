//! # Promotions
//!
//! Flash sale windows and the stock badges shown next to them.
//!
//! ## Sale Timeline
//! ```text
//!            start_at                         end_at
//!               │                               │
//!   Upcoming    │            Active             │    Expired
//! ──────────────┼───────────────────────────────┼──────────────► now
//!               │  price − discount_percent %   │  pruned by admin
//!               │  countdown "HH:MM:SS"         │  (expired_sale_ids)
//! ```
//!
//! Both ends of the window are inclusive.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Lang, Product, ProductId};

// =============================================================================
// Flash Sales
// =============================================================================

/// A row from the `flash_sales` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FlashSale {
    pub id: String,
    pub product_id: ProductId,
    pub discount_percent: u32,
    #[ts(as = "String")]
    pub start_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub end_at: DateTime<Utc>,
}

/// Where `now` falls relative to a sale window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum SalePhase {
    Upcoming,
    Active,
    Expired,
}

impl FlashSale {
    pub fn phase(&self, now: DateTime<Utc>) -> SalePhase {
        if now < self.start_at {
            SalePhase::Upcoming
        } else if now > self.end_at {
            SalePhase::Expired
        } else {
            SalePhase::Active
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.phase(now) == SalePhase::Active
    }

    /// Time left until the sale ends. Negative once it has ended.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.end_at - now
    }

    /// `price` with this sale's discount applied, rounded half-up.
    pub fn effective_price(&self, price: Money) -> Money {
        price.apply_percentage_discount(self.discount_percent.min(100))
    }
}

/// Price of `product` at `now`: the best active sale wins, otherwise the
/// list price.
///
/// ## Example
/// ```rust,ignore
/// // 10,000 IQD kibble with active 10% and 25% sales
/// assert_eq!(active_price(&kibble, &sales, now).dinars(), 7_500);
/// ```
pub fn active_price(product: &Product, sales: &[FlashSale], now: DateTime<Utc>) -> Money {
    sales
        .iter()
        .filter(|s| s.product_id == product.id && s.is_active(now))
        .map(|s| s.effective_price(product.price))
        .min()
        .unwrap_or(product.price)
}

/// Countdown label `HH:MM:SS`. `None` once the sale has ended.
///
/// Hours are not wrapped at 24, so a three-day sale reads `72:00:00`.
pub fn format_countdown(remaining: Duration) -> Option<String> {
    if remaining < Duration::zero() {
        return None;
    }

    let secs = remaining.num_seconds();
    Some(format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    ))
}

/// Label for a sale that has no countdown left.
pub fn ended_label(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Ended",
        Lang::Ar => "انتهى",
    }
}

/// Ids of sales whose window has closed, for the admin panel to delete.
pub fn expired_sale_ids(sales: &[FlashSale], now: DateTime<Utc>) -> Vec<String> {
    sales
        .iter()
        .filter(|s| s.phase(now) == SalePhase::Expired)
        .map(|s| s.id.clone())
        .collect()
}

/// Newest sale first, by start time.
pub fn sort_newest_first(sales: &mut [FlashSale]) {
    sales.sort_by(|a, b| b.start_at.cmp(&a.start_at));
}

// =============================================================================
// Stock Badges
// =============================================================================

/// Badge shown under a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum StockLevel {
    SoldOut,
    AlmostSoldOut,
    InStock,
}

impl StockLevel {
    pub fn classify(stock: i64, threshold: i64) -> Self {
        if stock <= 0 {
            StockLevel::SoldOut
        } else if stock < threshold {
            StockLevel::AlmostSoldOut
        } else {
            StockLevel::InStock
        }
    }

    pub fn label(&self, lang: Lang) -> Option<&'static str> {
        match (self, lang) {
            (StockLevel::SoldOut, Lang::En) => Some("Sold out"),
            (StockLevel::SoldOut, Lang::Ar) => Some("انتهى المخزون"),
            (StockLevel::AlmostSoldOut, Lang::En) => Some("Almost sold out"),
            (StockLevel::AlmostSoldOut, Lang::Ar) => Some("على وشك النفاد"),
            (StockLevel::InStock, _) => None,
        }
    }
}

/// Products with stock below `threshold`, lowest stock first.
pub fn low_stock(products: &[Product], threshold: i64) -> Vec<&Product> {
    let mut low: Vec<&Product> = products.iter().filter(|p| p.stock < threshold).collect();
    low.sort_by_key(|p| p.stock);
    low
}

// =============================================================================
// Admin Board
// =============================================================================

/// One row of the admin flash sale list.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleBoardEntry {
    pub sale: FlashSale,
    pub phase: SalePhase,
    /// Only for active sales.
    pub countdown: Option<String>,
    pub product_name: Option<String>,
    pub stock_level: Option<StockLevel>,
    pub sale_price: Option<Money>,
}

/// Builds the admin list: newest first, with countdowns and stock badges.
pub fn sale_board(
    sales: &[FlashSale],
    products: &[Product],
    now: DateTime<Utc>,
    lang: Lang,
    low_stock_threshold: i64,
) -> Vec<SaleBoardEntry> {
    let mut sorted = sales.to_vec();
    sort_newest_first(&mut sorted);

    sorted
        .into_iter()
        .map(|sale| {
            let phase = sale.phase(now);
            let product = products.iter().find(|p| p.id == sale.product_id);
            let countdown = match phase {
                SalePhase::Active => format_countdown(sale.remaining(now)),
                _ => None,
            };

            SaleBoardEntry {
                phase,
                countdown,
                product_name: product.map(|p| p.name.get(lang).to_string()),
                stock_level: product.map(|p| StockLevel::classify(p.stock, low_stock_threshold)),
                sale_price: product.map(|p| sale.effective_price(p.price)),
                sale,
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Animal, Category, CategoryKey, LocalizedText};
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, min, 0).unwrap()
    }

    fn sale(id: &str, product: &str, pct: u32, start: u32, end: u32) -> FlashSale {
        FlashSale {
            id: id.to_string(),
            product_id: product.into(),
            discount_percent: pct,
            start_at: at(start, 0),
            end_at: at(end, 0),
        }
    }

    fn product(id: &str, price: i64, stock: i64) -> Product {
        Product {
            id: id.into(),
            name: LocalizedText::new(format!("Product {id}"), format!("منتج {id}")),
            description: LocalizedText::default(),
            image_url: None,
            price: Money::from_dinars(price),
            stock,
            animal: Animal::Cats,
            category: CategoryKey::simple(Category::Clean),
        }
    }

    #[test]
    fn test_phase_boundaries_inclusive() {
        let s = sale("s1", "1", 10, 10, 12);
        assert_eq!(s.phase(at(9, 59)), SalePhase::Upcoming);
        assert_eq!(s.phase(at(10, 0)), SalePhase::Active);
        assert_eq!(s.phase(at(12, 0)), SalePhase::Active);
        assert_eq!(s.phase(at(12, 1)), SalePhase::Expired);
    }

    #[test]
    fn test_effective_price() {
        let s = sale("s1", "1", 15, 10, 12);
        assert_eq!(s.effective_price(Money::from_dinars(1250)).dinars(), 1062);
    }

    #[test]
    fn test_active_price_picks_best_active_sale() {
        let kibble = product("1", 10_000, 20);
        let sales = vec![
            sale("a", "1", 10, 8, 14),
            sale("b", "1", 25, 9, 13),
            sale("c", "1", 50, 15, 16),
            sale("d", "2", 90, 8, 14),
        ];
        assert_eq!(active_price(&kibble, &sales, at(11, 0)).dinars(), 7_500);
        assert_eq!(active_price(&kibble, &sales, at(20, 0)).dinars(), 10_000);
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(
            format_countdown(Duration::seconds(3 * 3600 + 5 * 60 + 9)).as_deref(),
            Some("03:05:09")
        );
        assert_eq!(format_countdown(Duration::zero()).as_deref(), Some("00:00:00"));
        assert_eq!(format_countdown(Duration::hours(72)).as_deref(), Some("72:00:00"));
        assert_eq!(format_countdown(Duration::seconds(-1)), None);
        assert_eq!(ended_label(Lang::Ar), "انتهى");
    }

    #[test]
    fn test_expired_sale_ids_and_sort() {
        let mut sales = vec![
            sale("old", "1", 10, 1, 2),
            sale("new", "1", 10, 9, 23),
            sale("mid", "1", 10, 5, 6),
        ];
        assert_eq!(expired_sale_ids(&sales, at(8, 0)), ["old", "mid"]);

        sort_newest_first(&mut sales);
        let ids: Vec<&str> = sales.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[test]
    fn test_stock_level() {
        assert_eq!(StockLevel::classify(0, 5), StockLevel::SoldOut);
        assert_eq!(StockLevel::classify(-2, 5), StockLevel::SoldOut);
        assert_eq!(StockLevel::classify(4, 5), StockLevel::AlmostSoldOut);
        assert_eq!(StockLevel::classify(5, 5), StockLevel::InStock);
        assert_eq!(StockLevel::InStock.label(Lang::En), None);
        assert_eq!(StockLevel::SoldOut.label(Lang::En), Some("Sold out"));
    }

    #[test]
    fn test_low_stock_sorted() {
        let products = vec![product("1", 100, 4), product("2", 100, 50), product("3", 100, 0)];
        let ids: Vec<&str> = low_stock(&products, 5).into_iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["3", "1"]);
    }

    #[test]
    fn test_sale_board() {
        let products = vec![product("1", 10_000, 2)];
        let sales = vec![sale("a", "1", 20, 8, 14), sale("b", "404", 10, 15, 16)];

        let board = sale_board(&sales, &products, at(12, 30), Lang::En, 5);
        assert_eq!(board.len(), 2);

        assert_eq!(board[0].sale.id, "b");
        assert_eq!(board[0].phase, SalePhase::Upcoming);
        assert_eq!(board[0].countdown, None);
        assert_eq!(board[0].product_name, None);

        assert_eq!(board[1].phase, SalePhase::Active);
        assert_eq!(board[1].countdown.as_deref(), Some("01:30:00"));
        assert_eq!(board[1].product_name.as_deref(), Some("Product 1"));
        assert_eq!(board[1].stock_level, Some(StockLevel::AlmostSoldOut));
        assert_eq!(board[1].sale_price, Some(Money::from_dinars(8_000)));
    }
}
