//! # Store Contracts
//!
//! The collaborators checkout depends on, expressed as traits. Hosted
//! back ends, SQL stores and gateways implement these outside this crate;
//! [`crate::memory`] provides in-process implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutService ──► CouponStore       find_active / record_usage      │
//! │        │                                                                │
//! │        ├──────────► PaymentProcessor  capture → Captured | Cancelled   │
//! │        │                                                                │
//! │        └──────────► OrderStore        create_order → order id          │
//! │                          │                                              │
//! │                          ▼ OrderChange                                  │
//! │  AdminOrders ◄──── OrderFeed          subscribe                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use zhilak_core::{CouponRecord, NewOrder, Order, OrderStatus};

use crate::error::StoreResult;

// =============================================================================
// Orders
// =============================================================================

/// Persists orders and reports them back to the admin console.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Stores an order and returns its identifier.
    async fn create_order(&self, order: NewOrder) -> StoreResult<String>;

    /// Returns all orders, newest first.
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;

    /// Changes an order's fulfilment status.
    async fn update_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<()>;
}

/// A change to the order table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OrderChange {
    Inserted { order_id: String },
    Updated { order_id: String, status: OrderStatus },
    Deleted { order_id: String },
}

impl OrderChange {
    pub fn order_id(&self) -> &str {
        match self {
            OrderChange::Inserted { order_id }
            | OrderChange::Updated { order_id, .. }
            | OrderChange::Deleted { order_id } => order_id,
        }
    }
}

/// Subscription interface for order changes.
pub trait OrderFeed: Send + Sync {
    /// Returns a receiver that sees every change made after this call.
    fn subscribe(&self) -> broadcast::Receiver<OrderChange>;
}

// =============================================================================
// Coupons
// =============================================================================

/// One redemption of a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponUsage {
    pub coupon_id: String,
    pub order_id: String,
    pub user_id: String,
}

/// Looks up coupons and records their use.
#[async_trait]
pub trait CouponStore: Send + Sync {
    /// Finds an active coupon by its upper-case code.
    async fn find_active(&self, code: &str) -> StoreResult<Option<CouponRecord>>;

    /// Lists coupons currently offered to shoppers.
    async fn list_active(&self) -> StoreResult<Vec<CouponRecord>>;

    /// Records that a coupon was used on an order.
    async fn record_usage(&self, usage: CouponUsage) -> StoreResult<()>;
}

// =============================================================================
// Payments
// =============================================================================

/// Prefill details for the payment sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCustomer {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// A request to collect money for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Amount in minor units (paise).
    pub amount_minor: i64,
    /// ISO 4217 code.
    pub currency: String,
    pub merchant: String,
    pub description: String,
    pub customer: PaymentCustomer,
}

/// How the payment sheet ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PaymentOutcome {
    Captured { payment_id: String },
    Cancelled,
}

/// Collects online payments.
///
/// Resolves once the gateway reports success or the customer dismisses the
/// payment sheet.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn capture(&self, request: PaymentRequest) -> StoreResult<PaymentOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_change_wire_shape() {
        let change = OrderChange::Updated {
            order_id: "o-1".to_string(),
            status: OrderStatus::Completed,
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "event": "updated", "order_id": "o-1", "status": "completed" })
        );
        assert_eq!(change.order_id(), "o-1");
    }

    #[test]
    fn test_payment_outcome_wire_shape() {
        let parsed: PaymentOutcome =
            serde_json::from_str(r#"{ "outcome": "captured", "payment_id": "pay_123" }"#).unwrap();
        assert_eq!(
            parsed,
            PaymentOutcome::Captured {
                payment_id: "pay_123".to_string()
            }
        );
    }
}
