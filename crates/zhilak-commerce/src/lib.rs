//! # zhilak-commerce: Checkout and Order Management
//!
//! Async orchestration of the storefront's checkout and admin order console.
//! Everything outside the workspace (order storage, coupon storage, payment
//! gateway, change notifications) is reached through the traits in
//! [`stores`].
//!
//! ## Module Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         zhilak-commerce                                 │
//! │                                                                         │
//! │  checkout.rs ── CheckoutService: coupons, quotes, place_order          │
//! │  admin.rs ───── AdminOrders: snapshot, search, status, watch           │
//! │  quote.rs ───── QuoteRequest → QuoteResponse (used by `quote` bin)     │
//! │  stores.rs ──── OrderStore / CouponStore / PaymentProcessor / OrderFeed│
//! │  memory.rs ──── MemoryStore, ScriptedPayments                          │
//! │  config.rs ──── CommerceConfig (TOML + env)                            │
//! │  error.rs ───── StoreError, CheckoutError, ApiError                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod checkout;
pub mod config;
pub mod error;
pub mod memory;
pub mod quote;
pub mod stores;

pub use admin::AdminOrders;
pub use checkout::{CheckoutService, PlacedOrder};
pub use config::{CommerceConfig, ConfigError};
pub use error::{ApiError, CheckoutError, CheckoutResult, ErrorCode, StoreError, StoreResult};
pub use memory::{MemoryStore, ScriptedPayments};
pub use stores::{
    CouponStore, CouponUsage, OrderChange, OrderFeed, OrderStore, PaymentCustomer,
    PaymentOutcome, PaymentProcessor, PaymentRequest,
};
