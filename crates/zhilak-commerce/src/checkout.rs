//! # Checkout Service
//!
//! Turns a confirmed cart into a stored order.
//!
//! ## Place Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  validate_shipping_fields (fields → phone → PIN code)                  │
//! │      │                                                                  │
//! │  signed in? ──no──► NotSignedIn                                        │
//! │      │                                                                  │
//! │  assemble_order (empty cart / pricing)                                  │
//! │      │                                                                  │
//! │      ├── COD ─────────────────────────────► create_order               │
//! │      │                                                                  │
//! │      └── Online ──► capture ──Cancelled──► PaymentCancelled            │
//! │                        │                                                │
//! │                     Captured ──► mark_paid ──► create_order            │
//! │                                                  │ fails               │
//! │                                                  ▼                      │
//! │                                          OrderAfterPayment             │
//! │                                                                         │
//! │  coupon applied? ──► record_usage (failure logged, order stands)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use zhilak_core::checkout::{assemble_order, payment_amount_minor, short_order_id};
use zhilak_core::pricing::{self, PricingResult};
use zhilak_core::validation::{normalize_coupon_code, validate_discount, validate_shipping_fields};
use zhilak_core::{AppliedCoupon, Cart, CouponRecord, Money, PaymentMethod, PaymentStatus, ShippingDetails};

use crate::config::CommerceConfig;
use crate::error::{CheckoutError, CheckoutResult};
use crate::stores::{
    CouponStore, CouponUsage, OrderStore, PaymentCustomer, PaymentOutcome, PaymentProcessor,
    PaymentRequest,
};

/// What the confirmation screen shows after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order_id: String,
    /// First eight characters of the id, upper-cased.
    pub short_id: String,
    pub total: Money,
    /// Gateway id for online payments.
    pub payment_id: Option<String>,
    pub payment_status: PaymentStatus,
}

/// Coordinates coupons, payment capture and order storage.
#[derive(Clone)]
pub struct CheckoutService {
    orders: Arc<dyn OrderStore>,
    coupons: Arc<dyn CouponStore>,
    payments: Arc<dyn PaymentProcessor>,
    config: Arc<CommerceConfig>,
}

impl CheckoutService {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        coupons: Arc<dyn CouponStore>,
        payments: Arc<dyn PaymentProcessor>,
        config: Arc<CommerceConfig>,
    ) -> Self {
        CheckoutService {
            orders,
            coupons,
            payments,
            config,
        }
    }

    /// Looks up an active coupon by code.
    ///
    /// The code is trimmed and upper-cased first, so `" welcome10 "` finds
    /// `WELCOME10`.
    ///
    /// ## Errors
    /// - `Validation(MissingField)` for a blank code
    /// - `CouponNotFound` when no active coupon matches
    /// - `Validation(OutOfRange)` when the stored discount is unusable
    pub async fn apply_coupon(&self, code: &str) -> CheckoutResult<AppliedCoupon> {
        let code = normalize_coupon_code(code)?;

        let record = self
            .coupons
            .find_active(&code)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| CheckoutError::CouponNotFound(code.clone()))?;

        validate_discount(&record.discount)?;

        info!(code = %record.code, discount = %record.discount.label(), "Coupon applied");
        Ok(AppliedCoupon::from(record))
    }

    /// Coupons the storefront advertises at checkout.
    pub async fn available_coupons(&self) -> CheckoutResult<Vec<CouponRecord>> {
        Ok(self.coupons.list_active().await?)
    }

    /// Prices the cart with an optional coupon.
    pub fn quote(&self, cart: &Cart, coupon: Option<&AppliedCoupon>) -> PricingResult {
        pricing::price(&cart.line_items(), coupon.map(|c| &c.discount))
    }

    /// Places an order for the signed-in customer.
    ///
    /// The shipping form is checked before sign-in, so a signed-out shopper
    /// still sees form errors first.
    ///
    /// Online orders are stored only after the gateway captures the payment.
    /// If storing then fails, the error carries the payment id so support can
    /// reconcile it.
    pub async fn place_order(
        &self,
        user_id: Option<&str>,
        cart: &Cart,
        details: &ShippingDetails,
        coupon: Option<&AppliedCoupon>,
        payment_method: PaymentMethod,
    ) -> CheckoutResult<PlacedOrder> {
        validate_shipping_fields(details)?;
        let user_id = user_id.ok_or(CheckoutError::NotSignedIn)?;
        debug!(user_id = %user_id, items = cart.item_count(), "Placing order");

        let order = assemble_order(user_id, cart, details, coupon, payment_method)?;
        let total = order.total;
        debug!(subtotal = %order.subtotal, discount = %order.discount, total = %total, "Order assembled");

        let (order_id, payment_id) = match payment_method {
            PaymentMethod::Cod => (self.orders.create_order(order).await?, None),
            PaymentMethod::Online => {
                let request = self.payment_request(total, details);
                match self.payments.capture(request).await? {
                    PaymentOutcome::Cancelled => {
                        info!("Customer cancelled payment");
                        return Err(CheckoutError::PaymentCancelled);
                    }
                    PaymentOutcome::Captured { payment_id } => {
                        info!(payment_id = %payment_id, "Payment captured");
                        let order_id = self
                            .orders
                            .create_order(order.mark_paid())
                            .await
                            .map_err(|source| CheckoutError::OrderAfterPayment {
                                payment_id: payment_id.clone(),
                                source,
                            })?;
                        (order_id, Some(payment_id))
                    }
                }
            }
        };

        if let Some(coupon) = coupon {
            let usage = CouponUsage {
                coupon_id: coupon.id.clone(),
                order_id: order_id.clone(),
                user_id: user_id.to_string(),
            };
            if let Err(e) = self.coupons.record_usage(usage).await {
                warn!(order_id = %order_id, code = %coupon.code, "Failed to record coupon usage: {}", e);
            }
        }

        info!(order_id = %order_id, total = %total, ?payment_method, "Order placed");

        let payment_status = match payment_id {
            Some(_) => PaymentStatus::Paid,
            None => PaymentStatus::Pending,
        };
        Ok(PlacedOrder {
            short_id: short_order_id(&order_id),
            order_id,
            total,
            payment_id,
            payment_status,
        })
    }

    fn payment_request(&self, total: Money, details: &ShippingDetails) -> PaymentRequest {
        PaymentRequest {
            amount_minor: payment_amount_minor(total),
            currency: self.config.store.currency.clone(),
            merchant: self.config.store.name.clone(),
            description: self.config.payment.description.clone(),
            customer: PaymentCustomer {
                name: details.full_name.clone(),
                email: details.email.clone(),
                contact: details.phone.clone(),
            },
        }
    }
}
