//! # Domain Types
//!
//! Core domain types shared between the storefront, the checkout service
//! and the admin console.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CouponRecord   │   │    NewOrder     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  customer       │   │  id (store)     │       │
//! │  │  code (UPPER)   │──►│  totals         │──►│  created_at     │       │
//! │  │  discount       │   │  items          │   │  + NewOrder     │       │
//! │  │  is_active      │   │  coupon_id      │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Discount     │   │   OrderStatus   │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Percentage(bps)│   │  Pending        │   │  Cod            │       │
//! │  │  Fixed(Money)   │   │  Completed      │   │  Online         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage discount represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1000 bps = 10% and fractional
/// percentages such as 12.5% stay exact integers (1250 bps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100% in basis points.
    pub const FULL_BPS: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a whole percentage.
    ///
    /// Saturates at `u32::MAX` bps, which [`is_valid`](Self::is_valid) rejects.
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        DiscountRate(percent.saturating_mul(100))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// 100%.
    #[inline]
    pub const fn full() -> Self {
        DiscountRate(Self::FULL_BPS)
    }

    /// Checks if the rate lies within 0–100%.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 <= Self::FULL_BPS
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// What a coupon takes off the subtotal.
///
/// Serialized adjacently tagged so the wire shape keeps the storefront's
/// `discount_type` / `discount_value` field names:
/// ```json
/// { "discount_type": "percentage", "discount_value": 1000 }
/// { "discount_type": "fixed", "discount_value": 30000 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "discount_type", content = "discount_value", rename_all = "snake_case")]
#[ts(export)]
pub enum Discount {
    /// Percentage of the subtotal.
    Percentage(DiscountRate),
    /// Fixed amount, never more than the subtotal.
    Fixed(Money),
}

impl Discount {
    /// Short label shown next to an applied or offered coupon, e.g. `10% off`.
    pub fn label(&self) -> String {
        match self {
            Discount::Percentage(rate) => format!("{} off", rate),
            Discount::Fixed(amount) => format!("{} off", amount.to_display_whole()),
        }
    }
}

// =============================================================================
// Coupons
// =============================================================================

/// A coupon as held by the coupon store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CouponRecord {
    pub id: String,
    /// Always upper-case.
    pub code: String,
    pub discount: Discount,
    pub is_active: bool,
}

/// The coupon attached to a checkout in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppliedCoupon {
    pub id: String,
    pub code: String,
    pub discount: Discount,
}

impl From<CouponRecord> for AppliedCoupon {
    fn from(record: CouponRecord) -> Self {
        AppliedCoupon {
            id: record.id,
            code: record.code,
            discount: record.discount,
        }
    }
}

// =============================================================================
// Order Status / Payment
// =============================================================================

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, waiting to be processed.
    #[default]
    Pending,
    /// Paid online or fulfilled by the admin.
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    /// Captured through the payment gateway before the order is stored.
    Online,
}

/// Whether money has been received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

// =============================================================================
// Shipping Details
// =============================================================================

/// The checkout form's customer and address fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    /// Six digit PIN code.
    pub postal_code: String,
}

// =============================================================================
// Orders
// =============================================================================

/// One line of an order, frozen at the time of checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOrderItem {
    pub product_id: String,
    /// Includes the size, e.g. `Silk Kurta (M)`.
    pub product_name: String,
    pub product_price: Money,
    pub quantity: i64,
}

impl NewOrderItem {
    /// Returns price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product_price.multiply_quantity(self.quantity)
    }
}

/// An order record ready to hand to the order store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOrder {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// `"{street}, {city}, {state} - {postal_code}"`
    pub shipping_address: String,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub coupon_id: Option<String>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    /// Marks the order as settled by the payment gateway.
    pub fn mark_paid(mut self) -> Self {
        self.payment_method = PaymentMethod::Online;
        self.payment_status = PaymentStatus::Paid;
        self.status = OrderStatus::Completed;
        self
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub details: NewOrder,
}

impl Order {
    /// Wraps an accepted order record with its store-assigned identity.
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, details: NewOrder) -> Self {
        Order {
            id: id.into(),
            created_at,
            details,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
