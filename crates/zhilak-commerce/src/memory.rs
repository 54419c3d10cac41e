//! # In-Memory Stores
//!
//! Process-local implementations of the store contracts, used by tests and
//! by local development without a back end.
//!
//! ## Thread Safety
//! State sits behind a `tokio::sync::RwLock`; every mutation is published on
//! a `broadcast` channel so [`OrderFeed`] subscribers see it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;
use zhilak_core::{CouponRecord, NewOrder, Order, OrderStatus};

use crate::config::CommerceConfig;
use crate::error::{StoreError, StoreResult};
use crate::stores::{
    CouponStore, CouponUsage, OrderChange, OrderFeed, OrderStore, PaymentOutcome,
    PaymentProcessor, PaymentRequest,
};

#[derive(Debug, Default)]
struct MemoryState {
    /// Oldest first.
    orders: Vec<Order>,
    /// Keyed by upper-case code.
    coupons: HashMap<String, CouponRecord>,
    usages: Vec<CouponUsage>,
}

/// Order store, coupon store and order feed in one process-local value.
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    changes: broadcast::Sender<OrderChange>,
    rejecting_orders: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store whose feed buffers `capacity` changes.
    pub fn new(capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(capacity);
        MemoryStore {
            state: RwLock::new(MemoryState::default()),
            changes,
            rejecting_orders: AtomicBool::new(false),
        }
    }

    /// Creates an empty store sized by `[feed] capacity`.
    pub fn from_config(config: &CommerceConfig) -> Self {
        debug!(capacity = config.feed.capacity, "Creating in-memory store");
        Self::new(config.feed.capacity)
    }

    /// Adds or replaces a coupon.
    pub async fn put_coupon(&self, coupon: CouponRecord) {
        let mut state = self.state.write().await;
        state.coupons.insert(coupon.code.to_uppercase(), coupon);
    }

    /// Returns every recorded coupon usage.
    pub async fn usages(&self) -> Vec<CouponUsage> {
        self.state.read().await.usages.clone()
    }

    /// Makes `create_order` fail, for exercising failure paths.
    pub fn reject_orders(&self, reject: bool) {
        self.rejecting_orders.store(reject, Ordering::SeqCst);
    }

    /// Removes an order.
    pub async fn delete_order(&self, order_id: &str) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let before = state.orders.len();
        state.orders.retain(|o| o.id != order_id);
        if state.orders.len() == before {
            return Err(not_found(order_id));
        }
        drop(state);

        self.publish(OrderChange::Deleted {
            order_id: order_id.to_string(),
        });
        Ok(())
    }

    fn publish(&self, change: OrderChange) {
        // No subscribers is not an error.
        let _ = self.changes.send(change);
    }
}

fn not_found(order_id: &str) -> StoreError {
    StoreError::NotFound {
        entity: "Order".to_string(),
        id: order_id.to_string(),
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::from_config(&CommerceConfig::default())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create_order(&self, order: NewOrder) -> StoreResult<String> {
        if self.rejecting_orders.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("order store is not accepting orders".into()));
        }

        let id = Uuid::new_v4().to_string();
        debug!(order_id = %id, total = %order.total, "Storing order");

        self.state
            .write()
            .await
            .orders
            .push(Order::new(id.clone(), Utc::now(), order));

        self.publish(OrderChange::Inserted {
            order_id: id.clone(),
        });
        Ok(id)
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let state = self.state.read().await;
        Ok(state.orders.iter().rev().cloned().collect())
    }

    async fn update_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| not_found(order_id))?;
        order.details.status = status;
        drop(state);

        self.publish(OrderChange::Updated {
            order_id: order_id.to_string(),
            status,
        });
        Ok(())
    }
}

impl OrderFeed for MemoryStore {
    fn subscribe(&self) -> broadcast::Receiver<OrderChange> {
        self.changes.subscribe()
    }
}

#[async_trait]
impl CouponStore for MemoryStore {
    async fn find_active(&self, code: &str) -> StoreResult<Option<CouponRecord>> {
        let state = self.state.read().await;
        Ok(state.coupons.get(code).filter(|c| c.is_active).cloned())
    }

    async fn list_active(&self) -> StoreResult<Vec<CouponRecord>> {
        let state = self.state.read().await;
        let mut active: Vec<CouponRecord> =
            state.coupons.values().filter(|c| c.is_active).cloned().collect();
        active.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(active)
    }

    async fn record_usage(&self, usage: CouponUsage) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if !state.coupons.values().any(|c| c.id == usage.coupon_id) {
            return Err(StoreError::NotFound {
                entity: "Coupon".to_string(),
                id: usage.coupon_id,
            });
        }
        state.usages.push(usage);
        Ok(())
    }
}

// =============================================================================
// Scripted Payments
// =============================================================================

/// Payment processor that answers every capture with a fixed outcome.
pub struct ScriptedPayments {
    outcome: PaymentOutcome,
    requests: Mutex<Vec<PaymentRequest>>,
}

impl ScriptedPayments {
    /// Every capture succeeds with a fresh payment id.
    pub fn approving() -> Self {
        Self::with_outcome(PaymentOutcome::Captured {
            payment_id: String::new(),
        })
    }

    /// Every capture is cancelled by the customer.
    pub fn cancelling() -> Self {
        Self::with_outcome(PaymentOutcome::Cancelled)
    }

    fn with_outcome(outcome: PaymentOutcome) -> Self {
        ScriptedPayments {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the requests seen so far.
    pub async fn requests(&self) -> Vec<PaymentRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl PaymentProcessor for ScriptedPayments {
    async fn capture(&self, request: PaymentRequest) -> StoreResult<PaymentOutcome> {
        self.requests.lock().await.push(request);

        Ok(match &self.outcome {
            PaymentOutcome::Captured { .. } => PaymentOutcome::Captured {
                payment_id: format!("pay_{}", Uuid::new_v4().simple()),
            },
            PaymentOutcome::Cancelled => PaymentOutcome::Cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zhilak_core::{Discount, DiscountRate, Money, PaymentMethod, PaymentStatus};

    fn new_order(name: &str) -> NewOrder {
        NewOrder {
            user_id: "user-1".to_string(),
            full_name: name.to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            shipping_address: "12 MG Road, Bengaluru, Karnataka - 560001".to_string(),
            subtotal: Money::from_major(100),
            discount: Money::zero(),
            total: Money::from_major(100),
            coupon_id: None,
            status: OrderStatus::Pending,
            payment_method: PaymentMethod::Cod,
            payment_status: PaymentStatus::Pending,
            items: Vec::new(),
        }
    }

    fn coupon(code: &str, active: bool) -> CouponRecord {
        CouponRecord {
            id: format!("id-{}", code),
            code: code.to_string(),
            discount: Discount::Percentage(DiscountRate::from_percent(10)),
            is_active: active,
        }
    }

    #[tokio::test]
    async fn test_orders_listed_newest_first() {
        let store = MemoryStore::default();
        store.create_order(new_order("First")).await.unwrap();
        store.create_order(new_order("Second")).await.unwrap();

        let orders = store.list_orders().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].details.full_name, "Second");
    }

    #[tokio::test]
    async fn test_changes_are_published() {
        let store = MemoryStore::default();
        let mut rx = store.subscribe();

        let id = store.create_order(new_order("Asha")).await.unwrap();
        store.update_status(&id, OrderStatus::Completed).await.unwrap();
        store.delete_order(&id).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), OrderChange::Inserted { order_id: id.clone() });
        assert_eq!(
            rx.recv().await.unwrap(),
            OrderChange::Updated {
                order_id: id.clone(),
                status: OrderStatus::Completed
            }
        );
        assert_eq!(rx.recv().await.unwrap(), OrderChange::Deleted { order_id: id });
    }

    #[tokio::test]
    async fn test_feed_capacity_comes_from_config() {
        let mut config = CommerceConfig::default();
        config.feed.capacity = 1;
        let store = MemoryStore::from_config(&config);
        let mut rx = store.subscribe();

        store.create_order(new_order("First")).await.unwrap();
        store.create_order(new_order("Second")).await.unwrap();

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
    }

    #[tokio::test]
    async fn test_default_store_buffers_default_capacity() {
        let store = MemoryStore::default();
        let mut rx = store.subscribe();
        for i in 0..CommerceConfig::default().feed.capacity {
            store.create_order(new_order(&format!("Customer {}", i))).await.unwrap();
        }
        assert!(matches!(rx.recv().await, Ok(OrderChange::Inserted { .. })));
    }

    #[tokio::test]
    async fn test_update_unknown_order() {
        let store = MemoryStore::default();
        let err = store
            .update_status("missing", OrderStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_rejecting_orders() {
        let store = MemoryStore::default();
        store.reject_orders(true);
        assert!(store.create_order(new_order("Asha")).await.is_err());
        store.reject_orders(false);
        assert!(store.create_order(new_order("Asha")).await.is_ok());
    }

    #[tokio::test]
    async fn test_inactive_coupons_hidden() {
        let store = MemoryStore::default();
        store.put_coupon(coupon("WELCOME10", true)).await;
        store.put_coupon(coupon("EXPIRED", false)).await;

        assert!(store.find_active("WELCOME10").await.unwrap().is_some());
        assert!(store.find_active("EXPIRED").await.unwrap().is_none());
        assert!(store.find_active("welcome10").await.unwrap().is_none());

        let active = store.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
    }

    #[tokio::test]
    async fn test_record_usage_requires_known_coupon() {
        let store = MemoryStore::default();
        store.put_coupon(coupon("WELCOME10", true)).await;

        let usage = CouponUsage {
            coupon_id: "id-WELCOME10".to_string(),
            order_id: "o-1".to_string(),
            user_id: "user-1".to_string(),
        };
        store.record_usage(usage.clone()).await.unwrap();
        assert_eq!(store.usages().await, vec![usage]);

        let unknown = CouponUsage {
            coupon_id: "nope".to_string(),
            order_id: "o-1".to_string(),
            user_id: "user-1".to_string(),
        };
        assert!(store.record_usage(unknown).await.is_err());
    }

    #[tokio::test]
    async fn test_scripted_payments() {
        let request = PaymentRequest {
            amount_minor: 225_000,
            currency: "INR".to_string(),
            merchant: "ZHILAK".to_string(),
            description: "Luxury Collection Purchase".to_string(),
            customer: crate::stores::PaymentCustomer {
                name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
                contact: "9876543210".to_string(),
            },
        };

        let approving = ScriptedPayments::approving();
        match approving.capture(request.clone()).await.unwrap() {
            PaymentOutcome::Captured { payment_id } => assert!(payment_id.starts_with("pay_")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(approving.requests().await, vec![request.clone()]);

        let cancelling = ScriptedPayments::cancelling();
        assert_eq!(
            cancelling.capture(request).await.unwrap(),
            PaymentOutcome::Cancelled
        );
    }
}
