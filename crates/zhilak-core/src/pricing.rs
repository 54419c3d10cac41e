//! # Order Pricing Calculator
//!
//! Turns a cart's line items and an optional coupon into a subtotal, a
//! discount and a final total.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  [LineItem]  ──► compute_subtotal ──► subtotal                         │
//! │                                          │                              │
//! │  Option<Discount> ───────────────► compute_discount ──► discount       │
//! │                                          │                 │            │
//! │                                          ▼                 ▼            │
//! │                                    compute_total(subtotal, discount)   │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                        PricingResult { subtotal, discount, total }     │
//! │                                                                         │
//! │  Invariants: discount ≤ subtotal, total = max(0, subtotal - discount)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure: recomputed on every cart or coupon change,
//! no hidden state, safe from any number of threads.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Discount;

// =============================================================================
// Types
// =============================================================================

/// One product/quantity pair being priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Non-negative unit price.
    pub unit_price: Money,
    /// Positive quantity.
    pub quantity: i64,
}

impl LineItem {
    #[inline]
    pub const fn new(unit_price: Money, quantity: i64) -> Self {
        LineItem {
            unit_price,
            quantity,
        }
    }

    /// Returns unit price × quantity.
    #[inline]
    pub const fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// Outcome of pricing a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingResult {
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

// =============================================================================
// Operations
// =============================================================================

/// Sums `unit_price × quantity` over all items. Empty input yields zero.
///
/// Arithmetic saturates, so input that skipped validation cannot wrap into
/// a negative subtotal.
///
/// ## Example
/// ```rust
/// use zhilak_core::money::Money;
/// use zhilak_core::pricing::{compute_subtotal, LineItem};
///
/// let items = [
///     LineItem::new(Money::from_major(1000), 2),
///     LineItem::new(Money::from_major(500), 1),
/// ];
/// assert_eq!(compute_subtotal(&items), Money::from_major(2500));
/// assert_eq!(compute_subtotal(&[]), Money::zero());
/// ```
pub fn compute_subtotal(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::line_total).sum()
}

/// Returns how much the coupon takes off `subtotal`.
///
/// - no coupon: zero
/// - percentage: `subtotal × rate`, rounded half away from zero to the
///   minor unit (see [`Money::percentage`])
/// - fixed: `min(value, subtotal)`
///
/// The result never exceeds the subtotal and is never negative, even for a
/// percentage above 100% that slipped past validation.
///
/// ## Example
/// ```rust
/// use zhilak_core::money::Money;
/// use zhilak_core::pricing::compute_discount;
/// use zhilak_core::types::Discount;
///
/// let subtotal = Money::from_major(500);
/// let huge = Discount::Fixed(Money::from_major(1000));
/// assert_eq!(compute_discount(subtotal, Some(&huge)), subtotal);
/// ```
pub fn compute_discount(subtotal: Money, coupon: Option<&Discount>) -> Money {
    let raw = match coupon {
        None => return Money::zero(),
        Some(Discount::Percentage(rate)) => subtotal.percentage(*rate),
        Some(Discount::Fixed(amount)) => *amount,
    };

    raw.min(subtotal).max(Money::zero())
}

/// Returns `max(0, subtotal - discount)`.
///
/// ## Example
/// ```rust
/// use zhilak_core::money::Money;
/// use zhilak_core::pricing::compute_total;
///
/// let total = compute_total(Money::from_major(100), Money::from_major(150));
/// assert_eq!(total, Money::zero());
/// ```
#[inline]
pub fn compute_total(subtotal: Money, discount: Money) -> Money {
    (subtotal - discount).max(Money::zero())
}

/// Prices a cart in one call.
///
/// ## User Workflow
/// ```text
/// Cart: Silk Kurta ₹1000 ×2, Dupatta ₹500 ×1
///      │
///      ▼
/// Coupon WELCOME10 (10%)
///      │
///      ▼
/// price() ← THIS FUNCTION
///      │
///      ▼
/// Subtotal ₹2,500 · Discount -₹250 · Total ₹2,250
/// ```
pub fn price(items: &[LineItem], coupon: Option<&Discount>) -> PricingResult {
    let subtotal = compute_subtotal(items);
    let discount = compute_discount(subtotal, coupon);
    let total = compute_total(subtotal, discount);

    PricingResult {
        subtotal,
        discount,
        total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
