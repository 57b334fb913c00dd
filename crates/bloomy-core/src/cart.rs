//! # Cart Lines and Checkout Totals
//!
//! A cart line is a product snapshot plus a quantity. Totals are derived,
//! never stored: every screen that shows money recomputes them from the
//! lines so the cart, checkout summary and payment screen always agree.
//!
//! ## Totals Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   [CartItem]  ──► Σ price × qty ──► subtotal                            │
//! │                                        │                                │
//! │                                        ├── subtotal > 0 ──► + fee       │
//! │                                        └── subtotal = 0 ──► + 0         │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                                      total                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Item
// =============================================================================

/// A product in the cart.
///
/// The product is copied in when first added, so the line keeps showing the
/// name and price the customer saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,

    /// Units of this product. Never below 1 while the line exists.
    pub quantity: i64,
}

impl CartItem {
    pub fn new(product: &Product, quantity: i64) -> Self {
        CartItem {
            product: product.clone(),
            quantity,
        }
    }

    /// Product id; cart lines are unique by it.
    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Checkout Totals
// =============================================================================

/// Money summary shown on the cart, checkout and payment screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    /// Distinct lines in the cart.
    pub item_count: usize,
    /// Units across all lines.
    pub total_quantity: i64,
    pub subtotal: Money,
    pub delivery: Money,
    pub total: Money,
}

impl CheckoutTotals {
    /// Computes totals for `items`, charging `delivery_fee` only when the
    /// subtotal is positive.
    ///
    /// ## Example
    /// ```rust
    /// use bloomy_core::{catalog, CartItem, CheckoutTotals, Money, DELIVERY_FEE};
    ///
    /// let products = catalog::seed_products();
    /// let items = vec![CartItem::new(&products[0], 2)]; // 2 × 45.00
    ///
    /// let totals = CheckoutTotals::from_cart(&items, DELIVERY_FEE);
    /// assert_eq!(totals.subtotal, Money::from_major(90));
    /// assert_eq!(totals.total, Money::from_major(95));
    ///
    /// let empty = CheckoutTotals::from_cart(&[], DELIVERY_FEE);
    /// assert!(empty.total.is_zero());
    /// ```
    pub fn from_cart(items: &[CartItem], delivery_fee: Money) -> Self {
        let subtotal: Money = items.iter().map(CartItem::line_total).sum();
        let delivery = if subtotal.is_positive() {
            delivery_fee
        } else {
            Money::zero()
        };

        CheckoutTotals {
            item_count: items.len(),
            total_quantity: items
                .iter()
                .fold(0i64, |acc, i| acc.saturating_add(i.quantity)),
            subtotal,
            delivery,
            total: subtotal + delivery,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use crate::DELIVERY_FEE;

    fn test_product(id: &str, cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Bouquet {}", id),
            price: Money::from_cents(cents),
            image: "image.png".to_string(),
            description: None,
            categories: vec![Category::Bouquets],
        }
    }

    #[test]
    fn test_totals_with_huge_quantity() {
        let items = vec![
            CartItem::new(&test_product("1", 4500), i64::MAX / 10),
            CartItem::new(&test_product("2", 3000), i64::MAX),
        ];
        let totals = CheckoutTotals::from_cart(&items, DELIVERY_FEE);

        assert_eq!(totals.subtotal, Money::from_cents(i64::MAX));
        assert_eq!(totals.total, Money::from_cents(i64::MAX));
        assert_eq!(totals.total_quantity, i64::MAX);
        assert_eq!(totals.delivery, DELIVERY_FEE);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::new(&test_product("1", 1250), 3);
        assert_eq!(item.line_total().cents(), 3750);
        assert_eq!(item.id(), "1");
    }

    #[test]
    fn test_totals_with_fee() {
        let items = vec![
            CartItem::new(&test_product("1", 4500), 2),
            CartItem::new(&test_product("2", 3800), 1),
        ];

        let totals = CheckoutTotals::from_cart(&items, DELIVERY_FEE);

        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.subtotal.cents(), 12800);
        assert_eq!(totals.delivery.cents(), 500);
        assert_eq!(totals.total.cents(), 13300);
    }

    #[test]
    fn test_empty_cart_has_no_delivery() {
        let totals = CheckoutTotals::from_cart(&[], DELIVERY_FEE);
        assert!(totals.is_empty());
        assert!(totals.delivery.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_free_products_skip_delivery() {
        let items = vec![CartItem::new(&test_product("1", 0), 4)];
        let totals = CheckoutTotals::from_cart(&items, DELIVERY_FEE);
        assert_eq!(totals.total_quantity, 4);
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_cart_item_serializes_flat() {
        let item = CartItem::new(&test_product("7", 6500), 1);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["quantity"], 1);
    }
}
