//! # Commerce Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ValidationError ──► CoreError ──┐                                     │
//! │                                  ├──► CheckoutError ──► ApiError ──► UI │
//! │  collaborator failure ──► StoreError ┘     (code + message)            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use zhilak_core::{CoreError, ValidationError};

// =============================================================================
// Store Error
// =============================================================================

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The collaborator refused the request.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The collaborator could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for collaborator calls.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Checkout Error
// =============================================================================

/// Everything that can stop a checkout or admin action.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Orders can only be placed by a signed-in customer.
    #[error("Please sign in to place an order")]
    NotSignedIn,

    /// No active coupon has this code.
    #[error("Invalid coupon code: {0}")]
    CouponNotFound(String),

    /// The customer dismissed the payment gateway.
    #[error("Payment cancelled")]
    PaymentCancelled,

    /// Money was captured but the order store refused the order.
    #[error("Payment {payment_id} captured but the order was not saved: {source}")]
    OrderAfterPayment {
        payment_id: String,
        #[source]
        source: StoreError,
    },

    /// Business rule or validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Collaborator failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::Core(CoreError::Validation(err))
    }
}

/// Result type alias for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// API Error
// =============================================================================

/// What a front end receives when a checkout call fails.
///
/// ```json
/// { "code": "VALIDATION_ERROR", "message": "Phone number must be exactly 10 digits" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Sign-in required (401)
    Unauthenticated,

    /// Cart operation failed
    CartError,

    /// Customer cancelled payment
    PaymentCancelled,

    /// Payment taken, order missing; needs support follow-up
    PaymentError,

    /// Collaborator failed (502)
    StoreError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::NotSignedIn => ApiError::new(ErrorCode::Unauthenticated, err.to_string()),
            CheckoutError::CouponNotFound(_) => {
                ApiError::new(ErrorCode::NotFound, "Invalid coupon code")
            }
            CheckoutError::PaymentCancelled => {
                ApiError::new(ErrorCode::PaymentCancelled, "Payment cancelled")
            }
            CheckoutError::OrderAfterPayment { ref payment_id, .. } => {
                tracing::error!(payment_id = %payment_id, "{}", err);
                ApiError::new(
                    ErrorCode::PaymentError,
                    "Failed to complete order after payment. Please contact support.",
                )
            }
            CheckoutError::Core(CoreError::Validation(e)) => {
                ApiError::new(ErrorCode::ValidationError, e.to_string())
            }
            CheckoutError::Core(e) => ApiError::new(ErrorCode::CartError, e.to_string()),
            CheckoutError::Store(StoreError::NotFound { entity, id }) => {
                ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            }
            CheckoutError::Store(e) => {
                tracing::error!("Store call failed: {}", e);
                ApiError::new(ErrorCode::StoreError, "Failed to place order")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
