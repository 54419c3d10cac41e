//! # Cart
//!
//! The shopper's cart: lines keyed by product (and size), each with a price
//! frozen when the line was added.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Storefront Action        Cart Method            Cart Change            │
//! │  ─────────────────        ───────────            ───────────            │
//! │                                                                         │
//! │  Add to Cart ────────────► add_item() ─────────► push or qty += n      │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ──► items[i].qty = n      │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ──────► items.remove(i)       │
//! │                                                                         │
//! │  Order Placed ───────────► clear() ────────────► items.clear()         │
//! │                                                                         │
//! │  Price Cart ─────────────► line_items() ───────► pricing::price()      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{self, LineItem};
use crate::validation::{validate_price_minor, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// A line in the cart.
///
/// The price is captured when the product is added; later catalogue price
/// changes do not affect lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Catalogue id. Sized variants may carry a `-{size}` suffix.
    pub product_id: String,
    pub name: String,
    pub size: Option<String>,
    pub unit_price: Money,
    pub quantity: i64,
}

impl CartItem {
    /// Creates a single-unit line for a product without a size.
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        CartItem {
            product_id: product_id.into(),
            name: name.into(),
            size: None,
            unit_price,
            quantity: 1,
        }
    }

    /// Sets the size variant.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Returns unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Returns the pricing view of this line.
    #[inline]
    pub fn line_item(&self) -> LineItem {
        LineItem::new(self.unit_price, self.quantity)
    }

    fn same_line(&self, product_id: &str, size: Option<&str>) -> bool {
        self.product_id == product_id && self.size.as_deref() == size
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `(product_id, size)`; adding again raises quantity
/// - Every quantity is within 1..=MAX_ITEM_QUANTITY
/// - At most MAX_CART_ITEMS lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a line, or raises the quantity of the matching line.
    ///
    /// `item.quantity` is the amount to add.
    pub fn add_item(&mut self, item: CartItem) -> CoreResult<()> {
        validate_quantity(item.quantity)?;
        validate_price_minor(item.unit_price.minor())?;

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.same_line(&item.product_id, item.size.as_deref()))
        {
            let new_qty = existing.quantity + item.quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(item);
        Ok(())
    }

    /// Sets the quantity of a line. Zero removes it.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        size: Option<&str>,
        quantity: i64,
    ) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id, size);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        validate_quantity(quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.same_line(product_id, size))
            .ok_or_else(|| CoreError::ItemNotInCart(product_id.to_string()))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Removes a line.
    pub fn remove_item(&mut self, product_id: &str, size: Option<&str>) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| !i.same_line(product_id, size));

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotInCart(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Returns the pricing view of every line.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(CartItem::line_item).collect()
    }

    /// Returns the subtotal before any coupon.
    pub fn subtotal(&self) -> Money {
        pricing::compute_subtotal(&self.line_items())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kurta() -> CartItem {
        CartItem::new("kurta-01", "Silk Kurta", Money::from_major(1000))
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add_item(kurta().with_quantity(2)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal(), Money::from_major(2000));
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        cart.add_item(kurta().with_quantity(2)).unwrap();
        cart.add_item(kurta().with_quantity(3)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_sizes_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add_item(kurta().with_size("M")).unwrap();
        cart.add_item(kurta().with_size("L")).unwrap();
        cart.add_item(kurta().with_size("M")).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_merge_respects_max_quantity() {
        let mut cart = Cart::new();
        cart.add_item(kurta().with_quantity(MAX_ITEM_QUANTITY)).unwrap();

        let err = cart.add_item(kurta()).unwrap_err();
        assert_eq!(
            err,
            CoreError::QuantityTooLarge {
                requested: MAX_ITEM_QUANTITY + 1,
                max: MAX_ITEM_QUANTITY
            }
        );
    }

    #[test]
    fn test_cart_line_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_item(CartItem::new(format!("p-{}", i), "Item", Money::from_major(1)))
                .unwrap();
        }

        let err = cart
            .add_item(CartItem::new("one-more", "Item", Money::from_major(1)))
            .unwrap_err();
        assert_eq!(err, CoreError::CartTooLarge { max: MAX_CART_ITEMS });
    }

    #[test]
    fn test_rejects_zero_quantity_and_negative_price() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(kurta().with_quantity(0)),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            cart.add_item(CartItem::new("x", "X", Money::from_minor(-1))),
            Err(CoreError::Validation(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_item(kurta()).unwrap();

        cart.update_quantity("kurta-01", None, 4).unwrap();
        assert_eq!(cart.total_quantity(), 4);

        assert!(matches!(
            cart.update_quantity("kurta-01", None, 1000),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert!(matches!(
            cart.update_quantity("missing", None, 2),
            Err(CoreError::ItemNotInCart(_))
        ));

        cart.update_quantity("kurta-01", None, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(kurta().with_size("M")).unwrap();

        assert!(cart.remove_item("kurta-01", None).is_err());
        cart.remove_item("kurta-01", Some("M")).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(kurta().with_quantity(2)).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }
}
