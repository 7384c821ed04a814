//! # Money Module
//!
//! Provides the `Money` type for every price, fee and total in the store.
//!
//! ## Why Whole Dinars?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICES ARE INTEGERS                                                    │
//! │                                                                         │
//! │  The store sells in Iraqi dinars (IQD). Shelf prices, delivery fees     │
//! │  and coupon amounts are all whole dinars (1,000 / 3,000 / 25,000).      │
//! │                                                                         │
//! │  So Money is a plain i64 of dinars:                                     │
//! │    • no floating point drift in subtotals                               │
//! │    • percentage discounts round once, explicitly, half-up               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use petpoint_core::money::Money;
//!
//! let price = Money::from_dinars(1000);
//! let line = price * 2u32;                        // 2,000
//! let total = line + Money::from_dinars(3000);   // 5,000
//! assert_eq!(total.to_string(), "5,000 IQD");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole Iraqi dinars.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts are subtracted, and a negative intermediate
///   must not wrap
/// - **Saturating arithmetic**: every operator clamps at the i64 bounds, so
///   an absurd quantity can never panic or wrap a total
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **serde transparent**: on the wire it is just a number, matching the
///   `price`, `fee` and `total` columns
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartLine.unit_price ──► CartLine.line_total
///                                                │
/// City.fee ────────────────────────┐             ▼
///                                  ├──► CheckoutQuote.total ──► Order.total
/// Coupon.discount ─────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole dinars.
    ///
    /// ## Example
    /// ```rust
    /// use petpoint_core::money::Money;
    ///
    /// let fee = Money::from_dinars(3000);
    /// assert_eq!(fee.dinars(), 3000);
    /// ```
    #[inline]
    pub const fn from_dinars(dinars: i64) -> Self {
        Money(dinars)
    }

    /// Returns the value in dinars.
    #[inline]
    pub const fn dinars(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use petpoint_core::money::Money;
    ///
    /// let unit_price = Money::from_dinars(500);
    /// assert_eq!(unit_price.multiply_quantity(3).dinars(), 1500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Returns `percent`% of this amount, rounded half-up to a whole dinar.
    ///
    /// ## Implementation
    /// Integer math: `(amount * percent + 50) / 100`, widened to i128 so a
    /// large order total cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use petpoint_core::money::Money;
    ///
    /// // 15% of 1,250 = 187.5 → 188
    /// assert_eq!(Money::from_dinars(1250).percentage(15).dinars(), 188);
    /// ```
    pub fn percentage(&self, percent: u32) -> Money {
        let part = (self.0 as i128 * percent as i128 + 50) / 100;
        let part = i64::try_from(part).unwrap_or(if part < 0 { i64::MIN } else { i64::MAX });
        Money::from_dinars(part)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Example
    /// ```rust
    /// use petpoint_core::money::Money;
    ///
    /// let price = Money::from_dinars(10_000);
    /// assert_eq!(price.apply_percentage_discount(20).dinars(), 8_000);
    /// ```
    pub fn apply_percentage_discount(&self, percent: u32) -> Money {
        *self - self.percentage(percent)
    }

    /// Clamps a negative amount to zero.
    #[inline]
    pub const fn non_negative(&self) -> Money {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }
}

/// Formats an integer with `,` thousands separators (`6500` → `"6,500"`).
///
/// Matches how the storefront renders amounts in both languages.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money the way the cart footer does.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IQD", group_thousands(self.0))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
