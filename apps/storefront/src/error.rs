//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in PetPoint                               │
//! │                                                                         │
//! │  Screen                      Rust Storefront                            │
//! │  ──────                      ───────────────                            │
//! │                                                                         │
//! │  placeOrder(form)                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── ValidationError::Required ───┐            │  │
//! │  │         │                                           │            │  │
//! │  │         ▼                                           ▼            │  │
//! │  │  Rule broken? ───────── CoreError::CouponExpired ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "COUPON_ERROR"                                           │
//! │    // e.message = "Coupon EID25 expired on 2024-04-12"                  │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Errors cross into the presentation layer as JSON, with a machine-readable
//! `code` and a human-readable `message`.

use petpoint_core::{CoreError, ValidationError};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API error returned from storefront commands.
///
/// ## Serialization
/// This is what the screen receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in the Screens
/// ```typescript
/// switch (e.code) {
///   case 'VALIDATION_ERROR': highlightForm(e.message); break;
///   case 'COUPON_ERROR':     showCouponHint(e.message); break;
///   default:                 showBanner(e.message);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Row not in the last fetched catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart cannot be checked out as it stands
    CartError,

    /// Coupon unknown, expired or used up
    CouponError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::EmptyCart
            | CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. } => ApiError::new(ErrorCode::CartError, message),
            CoreError::CouponNotFound(_)
            | CoreError::CouponExpired { .. }
            | CoreError::CouponExhausted { .. } => ApiError::new(ErrorCode::CouponError, message),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_serializes_for_screens() {
        let err = ApiError::not_found("Product", "42");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "NOT_FOUND", "message": "Product not found: 42" })
        );
    }

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(CoreError::EmptyCart);
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(err.message, "Cart is empty");

        let err = ApiError::from(CoreError::CouponExpired {
            code: "EID25".to_string(),
            expired_on: NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
        });
        assert_eq!(err.code, ErrorCode::CouponError);
        assert_eq!(err.message, "Coupon EID25 expired on 2024-04-12");

        let err = ApiError::from(CoreError::Validation(ValidationError::Required {
            field: "phone".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "phone is required");
    }

    #[test]
    fn test_display() {
        let err = ApiError::internal("lock lost");
        assert_eq!(err.to_string(), "[Internal] lock lost");
    }
}
