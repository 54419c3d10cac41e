//! # Validation Module
//!
//! Input validation for the checkout form, cart quantities and coupons.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront form                                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Shipping fields: present, phone, PIN code                         │
//! │  ├── Quantities and prices                                             │
//! │  └── Coupon codes and discount ranges                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order / coupon store                                         │
//! │  └── Whatever the collaborator enforces                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use zhilak_core::types::ShippingDetails;
//! use zhilak_core::validation::validate_shipping_fields;
//!
//! let details = ShippingDetails {
//!     full_name: "Asha Rao".into(),
//!     email: "asha@example.com".into(),
//!     phone: "9876543210".into(),
//!     street: "12 MG Road".into(),
//!     city: "Bengaluru".into(),
//!     state: "Karnataka".into(),
//!     postal_code: "560001".into(),
//! };
//! assert!(validate_shipping_fields(&details).is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::{Discount, ShippingDetails};
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_MINOR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const PHONE_DIGITS: usize = 10;
const POSTAL_CODE_DIGITS: usize = 6;

// =============================================================================
// Shipping Form
// =============================================================================

/// Validates the checkout form.
///
/// ## Rules (checked in this order)
/// 1. Every field is non-empty, else `MissingField` naming the first empty
///    field in form order
/// 2. Phone is exactly 10 ASCII digits, else `InvalidPhone`
/// 3. Postal code is exactly 6 ASCII digits, else `InvalidPostalCode`
///
/// Values are checked as given; nothing is trimmed.
pub fn validate_shipping_fields(details: &ShippingDetails) -> ValidationResult<()> {
    let fields = [
        ("full_name", &details.full_name),
        ("email", &details.email),
        ("phone", &details.phone),
        ("street", &details.street),
        ("city", &details.city),
        ("state", &details.state),
        ("postal_code", &details.postal_code),
    ];

    if let Some((name, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
        return Err(ValidationError::missing(name));
    }

    if !is_digits(&details.phone, PHONE_DIGITS) {
        return Err(ValidationError::InvalidPhone);
    }

    if !is_digits(&details.postal_code, POSTAL_CODE_DIGITS) {
        return Err(ValidationError::InvalidPostalCode);
    }

    Ok(())
}

/// True when `value` is exactly `len` ASCII digits.
fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in minor units.
///
/// ## Rules
/// - Zero is allowed
/// - Must not exceed MAX_PRICE_MINOR
pub fn validate_price_minor(minor: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_MINOR).contains(&minor) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_MINOR,
        });
    }

    Ok(())
}

// =============================================================================
// Coupons
// =============================================================================

/// Normalizes a coupon code as typed by the customer.
///
/// Surrounding whitespace is dropped and the code is upper-cased; coupon
/// codes are stored upper-case.
///
/// ## Example
/// ```rust
/// use zhilak_core::validation::normalize_coupon_code;
///
/// assert_eq!(normalize_coupon_code("  welcome10 ").unwrap(), "WELCOME10");
/// assert!(normalize_coupon_code("   ").is_err());
/// ```
pub fn normalize_coupon_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::missing("coupon code"));
    }

    Ok(code.to_uppercase())
}

/// Validates a coupon's discount.
///
/// ## Rules
/// - Percentage must be between 0% and 100%
/// - Fixed amount must be non-negative
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    match discount {
        Discount::Percentage(rate) if !rate.is_valid() => Err(ValidationError::OutOfRange {
            field: "discount percentage".to_string(),
            min: 0,
            max: 100,
        }),
        Discount::Fixed(amount) if amount.is_negative() => Err(ValidationError::OutOfRange {
            field: "discount amount".to_string(),
            min: 0,
            max: i64::MAX,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
