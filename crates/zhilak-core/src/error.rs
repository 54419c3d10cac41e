//! # Error Types
//!
//! Domain-specific error types for zhilak-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  zhilak-core errors (this file)                                        │
//! │  ├── CoreError        - Cart and checkout rule violations              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  zhilak-commerce errors (separate crate)                               │
//! │  ├── StoreError       - Collaborator failures                          │
//! │  └── CheckoutError    - What the storefront sees                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → ApiError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the cart and order assembly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// The referenced cart line does not exist.
    #[error("Product {0} not in cart")]
    ItemNotInCart(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant maps to one message the checkout form shows next to the
/// offending input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{field} is required")]
    MissingField { field: String },

    /// Phone number is not exactly 10 digits.
    #[error("Phone number must be exactly 10 digits")]
    InvalidPhone,

    /// Postal code is not exactly 6 digits.
    #[error("Pincode must be exactly 6 digits")]
    InvalidPostalCode,

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::MissingField`].
    pub fn missing(field: &str) -> Self {
        ValidationError::MissingField {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 1200,
            max: 999,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 1200 exceeds maximum allowed (999)"
        );
        assert_eq!(CoreError::EmptyCart.to_string(), "Your cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::missing("email").to_string(),
            "email is required"
        );
        assert_eq!(
            ValidationError::InvalidPhone.to_string(),
            "Phone number must be exactly 10 digits"
        );
        assert_eq!(
            ValidationError::InvalidPostalCode.to_string(),
            "Pincode must be exactly 6 digits"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidPhone.into();
        assert!(matches!(
            core_err,
            CoreError::Validation(ValidationError::InvalidPhone)
        ));
    }
}
