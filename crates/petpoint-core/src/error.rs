//! # Error Types
//!
//! Domain-specific error types for petpoint-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  petpoint-core errors (this file)                                      │
//! │  ├── CoreError        - Checkout and promotion rule failures           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront errors (app layer)                                         │
//! │  └── ApiError         - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Screen banner          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Navigation and cart operations never fail, so nothing here is raised by
//! [`crate::navigation`] or [`crate::cart`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule failures raised while preparing an order or pricing it.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has more distinct lines than checkout accepts.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// A single line exceeds the per-line quantity cap.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// No coupon matches the entered code.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Coupon expiry date is in the past.
    ///
    /// ## User Workflow
    /// ```text
    /// Enter code "EID25"
    ///      │
    ///      ▼
    /// expire_at = 2024-04-12, today = 2024-05-01
    ///      │
    ///      ▼
    /// CouponExpired { code: "EID25", expired_on: 2024-04-12 }
    ///      │
    ///      ▼
    /// Cart shows: "Coupon EID25 expired on 2024-04-12"
    /// ```
    #[error("Coupon {code} expired on {expired_on}")]
    CouponExpired {
        code: String,
        expired_on: chrono::NaiveDate,
    },

    /// Coupon has been redeemed as many times as allowed.
    #[error("Coupon {code} has reached its usage limit ({limit})")]
    CouponExhausted { code: String, limit: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the form checks in [`crate::validation`] and by the `FromStr`
/// impls that parse catalog keys coming off the wire.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed phone number or category key).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
