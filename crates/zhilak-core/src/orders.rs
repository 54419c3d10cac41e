//! # Order Search
//!
//! Client-side filtering of the admin order list.

use crate::types::Order;

/// Returns the orders whose customer name, email or id contains `query`,
/// ignoring case. An empty query matches every order. Input order is kept.
pub fn filter_orders<'a>(orders: &'a [Order], query: &str) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|order| {
            matches_query(
                &order.details.full_name,
                &order.details.email,
                &order.id,
                query,
            )
        })
        .collect()
}

/// Case-insensitive substring match over the searchable order fields.
///
/// ```rust
/// use zhilak_core::orders::matches_query;
///
/// assert!(matches_query("Asha Rao", "asha@example.com", "3f2a9c1e", "RAO"));
/// assert!(!matches_query("Asha Rao", "asha@example.com", "3f2a9c1e", "ravi"));
/// ```
pub fn matches_query(full_name: &str, email: &str, id: &str, query: &str) -> bool {
    let needle = query.to_lowercase();
    [full_name, email, id]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{NewOrder, OrderStatus, PaymentMethod, PaymentStatus};
    use chrono::Utc;

    fn order(id: &str, name: &str, email: &str) -> Order {
        Order::new(
            id,
            Utc::now(),
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
            },
        )
    }

    fn orders() -> Vec<Order> {
        vec![
            order("aaa11111", "Asha Rao", "asha@example.com"),
            order("bbb22222", "Ravi Kumar", "ravi@shop.in"),
            order("ccc33333", "Meera Iyer", "meera@example.com"),
        ]
    }

    fn ids(found: Vec<&Order>) -> Vec<String> {
        found.into_iter().map(|o| o.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_all() {
        let all = orders();
        assert_eq!(filter_orders(&all, "").len(), 3);
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let all = orders();
        assert_eq!(ids(filter_orders(&all, "RAVI")), vec!["bbb22222"]);
    }

    #[test]
    fn test_matches_email_and_keeps_order() {
        let all = orders();
        assert_eq!(
            ids(filter_orders(&all, "example.com")),
            vec!["aaa11111", "ccc33333"]
        );
    }

    #[test]
    fn test_matches_id() {
        let all = orders();
        assert_eq!(ids(filter_orders(&all, "CCC3")), vec!["ccc33333"]);
    }

    #[test]
    fn test_no_match() {
        let all = orders();
        assert!(filter_orders(&all, "nobody").is_empty());
    }
}
