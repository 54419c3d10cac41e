//! # Price Quotes
//!
//! JSON in, JSON out pricing for scripts and the `quote` binary.
//!
//! ```json
//! {
//!   "items": [
//!     { "unit_price": 100000, "quantity": 2 },
//!     { "unit_price": 50000, "quantity": 1 }
//!   ],
//!   "coupon": { "discount_type": "percentage", "discount_value": 1000 }
//! }
//! ```
//!
//! Prices are in paise; a percentage coupon is in basis points.

use serde::{Deserialize, Serialize};
use tracing::debug;
use zhilak_core::pricing::{self, LineItem, PricingResult};
use zhilak_core::validation::{validate_discount, validate_price_minor, validate_quantity};
use zhilak_core::{CoreError, CoreResult, Discount, MAX_CART_ITEMS};

use crate::config::CommerceConfig;

/// Cart contents to price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub coupon: Option<Discount>,
}

/// Priced cart plus display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub pricing: PricingResult,
    pub currency: String,
    /// Coupon label such as `"10% off"`.
    pub coupon_label: Option<String>,
    /// Total rounded to whole rupees, such as `"₹2,250"`.
    pub display_total: String,
}

/// Prices a request after checking every line and the coupon.
///
/// Requests are held to the same limits as a cart: at most
/// `MAX_CART_ITEMS` lines with validated prices and quantities.
pub fn quote(request: &QuoteRequest, config: &CommerceConfig) -> CoreResult<QuoteResponse> {
    if request.items.len() > MAX_CART_ITEMS {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        });
    }
    for item in &request.items {
        validate_price_minor(item.unit_price.minor())?;
        validate_quantity(item.quantity)?;
    }
    if let Some(coupon) = &request.coupon {
        validate_discount(coupon)?;
    }

    let totals = pricing::price(&request.items, request.coupon.as_ref());
    debug!(
        items = request.items.len(),
        subtotal = %totals.subtotal,
        total = %totals.total,
        "Quote computed"
    );

    Ok(QuoteResponse {
        pricing: totals,
        currency: config.store.currency.clone(),
        coupon_label: request.coupon.as_ref().map(Discount::label),
        display_total: totals.total.to_display_whole(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use zhilak_core::{Money, ValidationError, MAX_PRICE_MINOR};

    fn request(coupon: &str) -> QuoteRequest {
        serde_json::from_str(&format!(
            r#"{{
                "items": [
                    {{ "unit_price": 100000, "quantity": 2 }},
                    {{ "unit_price": 50000, "quantity": 1 }}
                ],
                "coupon": {}
            }}"#,
            coupon
        ))
        .unwrap()
    }

    #[test]
    fn test_quote_percentage_coupon() {
        let response = quote(
            &request(r#"{ "discount_type": "percentage", "discount_value": 1000 }"#),
            &CommerceConfig::default(),
        )
        .unwrap();

        assert_eq!(response.pricing.subtotal, Money::from_major(2500));
        assert_eq!(response.pricing.discount, Money::from_major(250));
        assert_eq!(response.pricing.total, Money::from_major(2250));
        assert_eq!(response.currency, "INR");
        assert_eq!(response.coupon_label.as_deref(), Some("10% off"));
        assert_eq!(response.display_total, "₹2,250");
    }

    #[test]
    fn test_quote_fixed_coupon() {
        let response = quote(
            &request(r#"{ "discount_type": "fixed", "discount_value": 30000 }"#),
            &CommerceConfig::default(),
        )
        .unwrap();

        assert_eq!(response.pricing.discount, Money::from_major(300));
        assert_eq!(response.pricing.total, Money::from_major(2200));
    }

    #[test]
    fn test_quote_without_coupon() {
        let parsed: QuoteRequest =
            serde_json::from_str(r#"{ "items": [{ "unit_price": 999, "quantity": 3 }] }"#).unwrap();
        let response = quote(&parsed, &CommerceConfig::default()).unwrap();

        assert_eq!(response.pricing.total, Money::from_minor(2997));
        assert_eq!(response.coupon_label, None);
    }

    #[test]
    fn test_quote_rejects_bad_input() {
        let over = request(r#"{ "discount_type": "percentage", "discount_value": 15000 }"#);
        assert!(matches!(
            quote(&over, &CommerceConfig::default()),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let zero_qty = QuoteRequest {
            items: vec![LineItem::new(Money::from_major(10), 0)],
            coupon: None,
        };
        assert!(quote(&zero_qty, &CommerceConfig::default()).is_err());
    }

    #[test]
    fn test_quote_rejects_price_that_would_overflow() {
        let parsed: QuoteRequest = serde_json::from_str(
            r#"{ "items": [{ "unit_price": 4611686018427387903, "quantity": 3 }], "coupon": null }"#,
        )
        .unwrap();

        assert!(matches!(
            quote(&parsed, &CommerceConfig::default()),
            Err(CoreError::Validation(ValidationError::OutOfRange { max: MAX_PRICE_MINOR, .. }))
        ));
    }

    #[test]
    fn test_quote_rejects_too_many_lines() {
        let request = QuoteRequest {
            items: vec![LineItem::new(Money::from_major(10), 1); MAX_CART_ITEMS + 1],
            coupon: None,
        };
        assert!(matches!(
            quote(&request, &CommerceConfig::default()),
            Err(CoreError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_response_flattens_pricing() {
        let response = quote(&request("null"), &CommerceConfig::default()).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["subtotal"], 250_000);
        assert_eq!(json["total"], 250_000);
        assert_eq!(json["currency"], "INR");
    }
}
