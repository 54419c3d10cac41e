//! # Admin Order Console
//!
//! Keeps a snapshot of all orders for the admin screen and refreshes it
//! whenever the order feed reports a change.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  OrderStore ──list_orders──► snapshot (newest first)                   │
//! │      ▲                            │                                     │
//! │      │ update_status              ├──► orders()                         │
//! │      │                            └──► search(query)                    │
//! │  set_status ──► refresh                                                 │
//! │                                                                         │
//! │  OrderFeed ──OrderChange──► watch loop ──► refresh                     │
//! │                   Lagged ──────────────► refresh                        │
//! │                   Closed / shutdown ───► stop                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, RwLock};
use tracing::{debug, info, warn};
use zhilak_core::orders::filter_orders;
use zhilak_core::{Order, OrderStatus};

use crate::error::CheckoutResult;
use crate::stores::{OrderChange, OrderStore};

/// Order list backing the admin screen.
pub struct AdminOrders {
    store: Arc<dyn OrderStore>,
    snapshot: RwLock<Vec<Order>>,
}

impl AdminOrders {
    /// Creates a console with an empty snapshot. Call [`refresh`](Self::refresh)
    /// to load orders.
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        AdminOrders {
            store,
            snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Reloads every order from the store.
    pub async fn refresh(&self) -> CheckoutResult<usize> {
        let orders = self.store.list_orders().await?;
        let count = orders.len();
        *self.snapshot.write().await = orders;
        debug!(count, "Admin order snapshot refreshed");
        Ok(count)
    }

    /// Current snapshot, newest first.
    pub async fn orders(&self) -> Vec<Order> {
        self.snapshot.read().await.clone()
    }

    /// Orders whose customer name, email or id contains `query`, ignoring
    /// case. An empty query returns everything.
    pub async fn search(&self, query: &str) -> Vec<Order> {
        let snapshot = self.snapshot.read().await;
        filter_orders(&snapshot, query).into_iter().cloned().collect()
    }

    /// Changes an order's status, then reloads the snapshot.
    pub async fn set_status(&self, order_id: &str, status: OrderStatus) -> CheckoutResult<()> {
        self.store.update_status(order_id, status).await?;
        info!(order_id = %order_id, %status, "Order status updated");
        self.refresh().await?;
        Ok(())
    }

    /// Refreshes the snapshot on every change until the feed closes, a
    /// shutdown signal arrives, or every shutdown sender is dropped.
    ///
    /// A lagging receiver has missed changes, so it refreshes as well.
    pub async fn watch(
        &self,
        mut changes: broadcast::Receiver<OrderChange>,
        mut shutdown: mpsc::Receiver<()>,
    ) {
        info!("Watching order changes");

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Order watch shutting down");
                    break;
                }

                change = changes.recv() => {
                    match change {
                        Ok(change) => {
                            debug!(order_id = %change.order_id(), "Order change received");
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Order feed lagged, reloading");
                        }
                        Err(RecvError::Closed) => {
                            info!("Order feed closed");
                            break;
                        }
                    }

                    if let Err(e) = self.refresh().await {
                        warn!("Failed to refresh orders: {}", e);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::stores::OrderFeed;
    use std::time::Duration;
    use zhilak_core::{Money, NewOrder, PaymentMethod, PaymentStatus};

    fn new_order(name: &str, email: &str) -> NewOrder {
        NewOrder {
            user_id: "user-1".to_string(),
            full_name: name.to_string(),
            email: email.to_string(),
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

    async fn wait_for_count(admin: &AdminOrders, expected: usize) {
        for _ in 0..50 {
            if admin.orders().await.len() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("snapshot never reached {} orders", expected);
    }

    #[tokio::test]
    async fn test_refresh_and_search() {
        let store = Arc::new(MemoryStore::default());
        store
            .create_order(new_order("Asha Rao", "asha@example.com"))
            .await
            .unwrap();
        store
            .create_order(new_order("Vikram Singh", "vik@example.com"))
            .await
            .unwrap();

        let admin = AdminOrders::new(store.clone());
        assert!(admin.orders().await.is_empty());
        assert_eq!(admin.refresh().await.unwrap(), 2);

        let orders = admin.orders().await;
        assert_eq!(orders[0].details.full_name, "Vikram Singh");

        assert_eq!(admin.search("ASHA").await.len(), 1);
        assert_eq!(admin.search("example.com").await.len(), 2);
        assert_eq!(admin.search("").await.len(), 2);
        assert!(admin.search("nobody").await.is_empty());

        let id_prefix = orders[1].id[..8].to_string();
        let by_id = admin.search(&id_prefix).await;
        assert_eq!(by_id[0].id, orders[1].id);
    }

    #[tokio::test]
    async fn test_set_status_refreshes_snapshot() {
        let store = Arc::new(MemoryStore::default());
        let id = store
            .create_order(new_order("Asha Rao", "asha@example.com"))
            .await
            .unwrap();

        let admin = AdminOrders::new(store.clone());
        admin.set_status(&id, OrderStatus::Completed).await.unwrap();

        let orders = admin.orders().await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].details.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_set_status_unknown_order() {
        let store = Arc::new(MemoryStore::default());
        let admin = AdminOrders::new(store);
        assert!(admin
            .set_status("missing", OrderStatus::Completed)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_watch_follows_feed_until_shutdown() {
        let store = Arc::new(MemoryStore::default());
        let admin = Arc::new(AdminOrders::new(store.clone()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let watcher = {
            let admin = admin.clone();
            let changes = store.subscribe();
            tokio::spawn(async move { admin.watch(changes, shutdown_rx).await })
        };

        let id = store
            .create_order(new_order("Asha Rao", "asha@example.com"))
            .await
            .unwrap();
        wait_for_count(&admin, 1).await;

        store
            .create_order(new_order("Vikram Singh", "vik@example.com"))
            .await
            .unwrap();
        wait_for_count(&admin, 2).await;

        store.delete_order(&id).await.unwrap();
        wait_for_count(&admin, 1).await;

        shutdown_tx.send(()).await.unwrap();
        watcher.await.unwrap();
    }

    #[tokio::test]
    async fn test_watch_recovers_from_lag() {
        let store = Arc::new(MemoryStore::new(1));
        let admin = Arc::new(AdminOrders::new(store.clone()));
        let changes = store.subscribe();

        // Overflow the single-slot feed before the watcher starts.
        for i in 0..3 {
            store
                .create_order(new_order(&format!("Customer {}", i), "c@example.com"))
                .await
                .unwrap();
        }

        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let watcher = {
            let admin = admin.clone();
            tokio::spawn(async move { admin.watch(changes, shutdown_rx).await })
        };

        wait_for_count(&admin, 3).await;

        shutdown_tx.send(()).await.unwrap();
        watcher.await.unwrap();
    }

    #[tokio::test]
    async fn test_watch_stops_when_shutdown_sender_dropped() {
        let store = Arc::new(MemoryStore::default());
        let admin = AdminOrders::new(store.clone());
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        drop(shutdown_tx);

        admin.watch(store.subscribe(), shutdown_rx).await;
    }
}
