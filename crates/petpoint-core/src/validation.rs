//! # Validation Module
//!
//! Input validation for the checkout form and the admin catalog forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen (React Native)                                        │
//! │  ├── Required-field hints                                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  ├── Type validation (deserialization of keys and ids)                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Hosted backend                                               │
//! │  ├── NOT NULL columns                                                  │
//! │  └── Row level security                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use petpoint_core::validation::{validate_phone, validate_quantity};
//!
//! assert_eq!(validate_phone("0770-123-4567").unwrap(), "07701234567");
//! assert!(validate_quantity(5).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::LocalizedText;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;
const PRODUCT_NAME_MAX: usize = 200;
const COUPON_CODE_MIN: usize = 3;
const COUPON_CODE_MAX: usize = 32;

// =============================================================================
// String Validators
// =============================================================================

/// Validates and normalises a phone number.
///
/// ## Rules
/// - Must not be empty
/// - Spaces, dashes and parentheses are ignored
/// - Optional leading `+`
/// - 7 to 15 digits
///
/// ## Returns
/// The number with separators stripped, e.g. `"+964 770 123 4567"` →
/// `"+9647701234567"`.
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let (plus, rest) = match phone.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", phone),
    };

    let mut digits = String::with_capacity(rest.len());
    for ch in rest.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            ' ' | '-' | '(' | ')' => {}
            _ => {
                return Err(ValidationError::InvalidFormat {
                    field: "phone".to_string(),
                    reason: "must contain only digits".to_string(),
                })
            }
        }
    }

    if digits.len() < PHONE_MIN_DIGITS {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: PHONE_MIN_DIGITS,
        });
    }

    if digits.len() > PHONE_MAX_DIGITS {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: PHONE_MAX_DIGITS,
        });
    }

    Ok(format!("{plus}{digits}"))
}

/// Validates a product name in one language.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use petpoint_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Royal Canin Kitten 2kg").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > PRODUCT_NAME_MAX {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: PRODUCT_NAME_MAX,
        });
    }

    Ok(())
}

/// Trims both translations and fills a missing one from the other.
///
/// The admin form only requires one language; the storefront shows
/// whichever exists.
///
/// ## Example
/// ```rust
/// use petpoint_core::types::LocalizedText;
/// use petpoint_core::validation::normalize_localized;
///
/// let name = normalize_localized("name", &LocalizedText::new(" Kibble ", "")).unwrap();
/// assert_eq!(name, LocalizedText::same("Kibble"));
/// ```
pub fn normalize_localized(field: &str, text: &LocalizedText) -> ValidationResult<LocalizedText> {
    let en = text.en.trim();
    let ar = text.ar.trim();

    match (en.is_empty(), ar.is_empty()) {
        (true, true) => Err(ValidationError::Required {
            field: field.to_string(),
        }),
        (false, true) => Ok(LocalizedText::same(en)),
        (true, false) => Ok(LocalizedText::same(ar)),
        (false, false) => Ok(LocalizedText::new(en, ar)),
    }
}

/// Validates a coupon code typed by the admin.
///
/// ## Rules
/// - 3 to 32 characters
/// - Letters, numbers, hyphens, underscores
pub fn validate_coupon_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    let len = code.chars().count();
    if len < COUPON_CODE_MIN {
        return Err(ValidationError::TooShort {
            field: "code".to_string(),
            min: COUPON_CODE_MIN,
        });
    }
    if len > COUPON_CODE_MAX {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: COUPON_CODE_MAX,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(code.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity at checkout.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Checkout                                                         │
/// │                                                                         │
/// │  Line "Cat litter 10L" qty 1200                                        │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(1200) ← THIS FUNCTION                               │
/// │       │                                                                 │
/// │       ├── qty == 0?  → Error: "quantity must be positive"              │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       └── OK → order draft                                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a shelf price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free samples)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Stock is saved as entered, except negatives become zero.
pub fn clamp_stock(stock: i64) -> i64 {
    stock.max(0)
}

/// Validates a coupon or flash sale percentage.
pub fn validate_discount_percent(percent: u32) -> ValidationResult<()> {
    if !(1..=100).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 1,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of distinct lines) at checkout.
///
/// ## Rules
/// - Must not exceed MAX_CART_LINES (100)
pub fn validate_cart_size(lines: usize) -> ValidationResult<()> {
    if lines > MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
