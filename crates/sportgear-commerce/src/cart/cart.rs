//! Cart and line item types.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Items are kept in insertion order with at most one item per product, and
/// every item has a quantity of at least one. The fields are private so those
/// invariants only change through the methods below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart priced in `currency`.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing item's quantity or appends a new item.
    pub fn add_to_cart(&mut self, product: &Product) {
        self.add_quantity(product, 1);
    }

    /// Add `quantity` units of a product; zero is a no-op.
    pub fn add_quantity(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return;
        }

        self.items.push(CartItem::from_product(product, quantity));
    }

    /// Set an item's quantity.
    ///
    /// A quantity of zero or less removes the item. Unknown ids are ignored.
    /// Returns whether the cart changed.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_from_cart(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove an item; returns whether it was present.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Remove every item.
    pub fn clear_cart(&mut self) {
        self.items.clear();
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get an item by product ID.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Quantity held for a product, zero if absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.get(product_id).map(|i| i.quantity).unwrap_or(0)
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of price times quantity over all items.
    pub fn total_price(&self) -> Money {
        Money::sum(self.items.iter().map(CartItem::line_total), self.currency)
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

/// A line in the cart: the product fields the cart displays plus a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    /// Unit price.
    pub price: Money,
    pub image: String,
    /// Always at least one.
    pub quantity: u32,
}

impl CartItem {
    fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), "Brand", "gear", Money::usd(cents))
    }

    fn assert_totals_consistent(cart: &Cart) {
        let expected_items: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
        let expected_cents: i64 = cart
            .items()
            .iter()
            .map(|i| i.price.amount_cents * i64::from(i.quantity))
            .sum();
        assert_eq!(cart.total_items(), expected_items);
        assert_eq!(cart.total_price().amount_cents, expected_cents);
        assert!(cart.items().iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_repeated_adds_increment_one_item() {
        let mut cart = Cart::new();
        let ball = product("A", 5000);

        for _ in 0..5 {
            cart.add_to_cart(&ball);
        }

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.quantity_of(&ball.id), 5);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_add_quantity() {
        let mut cart = Cart::new();
        let ball = product("A", 5000);

        cart.add_quantity(&ball, 3);
        cart.add_quantity(&ball, 0);
        cart.add_to_cart(&ball);

        assert_eq!(cart.quantity_of(&ball.id), 4);
        assert_eq!(cart.total_price(), Money::usd(20000));
    }

    #[test]
    fn test_add_twice_then_update_to_one() {
        let mut cart = Cart::new();
        let a = product("A", 5000);

        cart.add_to_cart(&a);
        cart.add_to_cart(&a);
        assert!(cart.update_quantity(&a.id, 1));

        assert_eq!(cart.quantity_of(&a.id), 1);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let mut cart = Cart::new();
        let a = product("A", 5000);
        let b = product("B", 1000);

        cart.add_to_cart(&a);
        cart.add_to_cart(&b);

        assert!(cart.update_quantity(&a.id, 0));
        assert!(cart.get(&a.id).is_none());
        assert!(cart.update_quantity(&b.id, -3));
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("A", 5000));
        let before = cart.clone();

        assert!(!cart.update_quantity(&ProductId::new("missing"), 4));
        assert!(!cart.remove_from_cart(&ProductId::new("missing")));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let mut cart = Cart::new();
        for id in ["A", "B", "C"] {
            cart.add_to_cart(&product(id, 100));
        }

        assert!(cart.remove_from_cart(&ProductId::new("B")));
        let order: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(order, ["A", "C"]);
    }

    #[test]
    fn test_totals_hold_after_every_mutation() {
        let mut cart = Cart::new();
        let a = product("A", 4999);
        let b = product("B", 699);
        let c = product("C", 12900);

        cart.add_to_cart(&a);
        assert_totals_consistent(&cart);
        cart.add_quantity(&b, 3);
        assert_totals_consistent(&cart);
        cart.add_to_cart(&c);
        assert_totals_consistent(&cart);
        cart.update_quantity(&a.id, 7);
        assert_totals_consistent(&cart);
        cart.remove_from_cart(&c.id);
        assert_totals_consistent(&cart);
        cart.update_quantity(&b.id, 0);
        assert_totals_consistent(&cart);

        assert_eq!(cart.total_price(), Money::usd(4999 * 7));
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = Cart::new();
        cart.add_quantity(&product("A", 5000), 2);
        cart.add_to_cart(&product("B", 10000));

        cart.clear_cart();

        assert!(cart.items().is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Money::usd(0));
    }

    #[test]
    fn test_huge_quantity_saturates() {
        let mut cart = Cart::new();
        let a = product("A", 1);
        cart.update_quantity(&a.id, 5);
        cart.add_to_cart(&a);
        assert!(cart.update_quantity(&a.id, i64::MAX));
        assert_eq!(cart.quantity_of(&a.id), u32::MAX);
    }
}
