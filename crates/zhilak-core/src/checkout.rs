//! # Order Assembly
//!
//! Builds the order record the storefront hands to the order store once the
//! shopper confirms checkout.
//!
//! ## Checkout Wizard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐                    │
//! │  │   Cart   │────►│ Details  │────►│ Confirmation │                    │
//! │  │  Review  │     │  Entry   │     │              │                    │
//! │  └──────────┘     └──────────┘     └──────────────┘                    │
//! │       │                │                   ▲                            │
//! │  EmptyCart?     assemble_order() ──► NewOrder ──► order store          │
//! │                   ├── validate_shipping_fields                         │
//! │                   ├── pricing::price                                   │
//! │                   └── order_item_from_cart (per line)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::{Cart, CartItem};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing;
use crate::types::{
    AppliedCoupon, NewOrder, NewOrderItem, OrderStatus, PaymentMethod, PaymentStatus,
    ShippingDetails,
};
use crate::validation::validate_shipping_fields;

/// Characters of the order id shown to customers and admins.
const SHORT_ID_LEN: usize = 8;

/// Formats the single-line address stored on the order.
///
/// ## Example
/// ```rust
/// use zhilak_core::checkout::format_shipping_address;
/// use zhilak_core::types::ShippingDetails;
///
/// let details = ShippingDetails {
///     street: "12 MG Road".into(),
///     city: "Bengaluru".into(),
///     state: "Karnataka".into(),
///     postal_code: "560001".into(),
///     ..Default::default()
/// };
/// assert_eq!(
///     format_shipping_address(&details),
///     "12 MG Road, Bengaluru, Karnataka - 560001"
/// );
/// ```
pub fn format_shipping_address(details: &ShippingDetails) -> String {
    format!(
        "{}, {}, {} - {}",
        details.street, details.city, details.state, details.postal_code
    )
}

/// Converts a cart line into an order line.
///
/// Sized lines are named `"{name} ({size})"` and their catalogue id loses
/// the `-{size}` suffix the storefront appends to variant ids.
pub fn order_item_from_cart(item: &CartItem) -> NewOrderItem {
    let (product_id, product_name) = match item.size.as_deref() {
        Some(size) => {
            let suffix = format!("-{}", size);
            let product_id = item
                .product_id
                .strip_suffix(suffix.as_str())
                .unwrap_or(&item.product_id)
                .to_string();
            (product_id, format!("{} ({})", item.name, size))
        }
        None => (item.product_id.clone(), item.name.clone()),
    };

    NewOrderItem {
        product_id,
        product_name,
        product_price: item.unit_price,
        quantity: item.quantity,
    }
}

/// Assembles an order from the checkout state.
///
/// ## Errors
/// - `CoreError::EmptyCart` when there is nothing to order
/// - `CoreError::Validation` when the shipping form is incomplete or malformed
///
/// The order starts `pending` with payment `pending`; online checkouts call
/// [`NewOrder::mark_paid`] once the gateway has captured the payment.
pub fn assemble_order(
    user_id: &str,
    cart: &Cart,
    details: &ShippingDetails,
    coupon: Option<&AppliedCoupon>,
    payment_method: PaymentMethod,
) -> CoreResult<NewOrder> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    validate_shipping_fields(details)?;

    let totals = pricing::price(&cart.line_items(), coupon.map(|c| &c.discount));

    Ok(NewOrder {
        user_id: user_id.to_string(),
        full_name: details.full_name.clone(),
        email: details.email.clone(),
        phone: details.phone.clone(),
        shipping_address: format_shipping_address(details),
        subtotal: totals.subtotal,
        discount: totals.discount,
        total: totals.total,
        coupon_id: coupon.map(|c| c.id.clone()),
        status: OrderStatus::Pending,
        payment_method,
        payment_status: PaymentStatus::Pending,
        items: cart.items.iter().map(order_item_from_cart).collect(),
    })
}

/// Amount handed to the payment gateway, in minor units (paise).
#[inline]
pub fn payment_amount_minor(total: Money) -> i64 {
    total.minor()
}

/// First eight characters of an order id, upper-cased, for display.
///
/// ## Example
/// ```rust
/// use zhilak_core::checkout::short_order_id;
///
/// assert_eq!(short_order_id("3f2a9c1e-77aa-4b7e-9d51-0c2f"), "3F2A9C1E");
/// ```
pub fn short_order_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect::<String>().to_uppercase()
}
