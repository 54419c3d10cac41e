//! # zhilak-core: Pure Business Logic for the Zhilak Storefront
//!
//! This crate holds the storefront's pricing and checkout rules as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Zhilak Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront / Admin UI                        │   │
//! │  │    Cart Review ──► Shipping Details ──► Confirmation            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  zhilak-commerce (async)                        │   │
//! │  │    apply_coupon, place_order, AdminOrders                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ zhilak-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────┐ ┌──────────┐ ┌───────────┐  │   │
//! │  │   │ pricing │ │  money  │ │ cart │ │ checkout │ │ validation│  │   │
//! │  │   └─────────┘ └─────────┘ └──────┘ └──────────┘ └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Order Pricing Calculator (subtotal, discount, total)
//! - [`money`] - Money type with integer arithmetic in minor units
//! - [`types`] - Domain types (Coupon, Discount, Order, ...)
//! - [`cart`] - Shopping cart
//! - [`checkout`] - Order assembly from a cart
//! - [`orders`] - Admin order search
//! - [`validation`] - Shipping form and coupon code rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use zhilak_core::money::Money;
//! use zhilak_core::pricing::{price, LineItem};
//! use zhilak_core::types::{Discount, DiscountRate};
//!
//! let items = [
//!     LineItem::new(Money::from_major(1000), 2),
//!     LineItem::new(Money::from_major(500), 1),
//! ];
//! let ten_percent = Discount::Percentage(DiscountRate::from_percent(10));
//!
//! let result = price(&items, Some(&ten_percent));
//! assert_eq!(result.subtotal, Money::from_major(2500));
//! assert_eq!(result.discount, Money::from_major(250));
//! assert_eq!(result.total, Money::from_major(2250));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod orders;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{LineItem, PricingResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single cart line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest accepted unit price, in minor units (₹100 crore).
///
/// A full cart at this price and [`MAX_ITEM_QUANTITY`] stays far inside i64.
pub const MAX_PRICE_MINOR: i64 = 100_000_000_000;

/// ISO 4217 code of the storefront currency.
pub const CURRENCY_CODE: &str = "INR";
