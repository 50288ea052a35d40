//! Cart type and its pure transformations.
//!
//! Every transformation borrows the current cart and returns a new one, so a
//! caller can compute the next state, persist it, and only then publish it.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Deserializer, Serialize};

/// An ordered list of line-items, unique by product id.
///
/// Serializes as a bare JSON array of products. Decoding goes through
/// [`Cart::from_items`], so a decoded cart always satisfies the invariants.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw line-items, enforcing the cart invariants.
    ///
    /// Items with a non-positive amount are dropped and only the first
    /// line-item for a given id is kept. Order is otherwise preserved.
    pub fn from_items(items: impl IntoIterator<Item = Product>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.amount >= 1 && !cart.contains(item.id) {
                cart.items.push(item);
            }
        }
        cart
    }

    /// Line-items in cart order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Iterate over line-items in cart order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    /// Look up a line-item by product id.
    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.items.iter().find(|i| i.id == product_id)
    }

    /// Index of the line-item for `product_id`.
    pub fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|i| i.id == product_id)
    }

    /// Check if the cart has a line-item for `product_id`.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    /// Number of distinct line-items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all line-items.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Cart with `product` appended as a new line-item.
    pub fn with_added(&self, product: Product) -> Result<Cart, CommerceError> {
        if product.amount < 1 {
            return Err(CommerceError::InvalidQuantity(product.amount));
        }
        if self.contains(product.id) {
            return Err(CommerceError::DuplicateItem(product.id));
        }

        let mut items = self.items.clone();
        items.push(product);
        Ok(Cart { items })
    }

    /// Cart with the line-item for `product_id` set to `amount`, in place.
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> Result<Cart, CommerceError> {
        if amount < 1 {
            return Err(CommerceError::InvalidQuantity(amount));
        }
        let index = self
            .position(product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?;

        let mut items = self.items.clone();
        if let Some(item) = items.get_mut(index) {
            item.amount = amount;
        }
        Ok(Cart { items })
    }

    /// Cart with the line-item for `product_id` incremented by one unit.
    pub fn with_incremented(&self, product_id: ProductId) -> Result<Cart, CommerceError> {
        let current = self
            .find(product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?;
        let next = current
            .amount
            .checked_add(1)
            .ok_or(CommerceError::Overflow(product_id))?;
        self.with_amount(product_id, next)
    }

    /// Cart without the line-item for `product_id`.
    pub fn without(&self, product_id: ProductId) -> Result<Cart, CommerceError> {
        if !self.contains(product_id) {
            return Err(CommerceError::ItemNotInCart(product_id));
        }

        let items = self
            .items
            .iter()
            .filter(|i| i.id != product_id)
            .cloned()
            .collect();
        Ok(Cart { items })
    }
}

impl From<Vec<Product>> for Cart {
    fn from(items: Vec<Product>) -> Self {
        Cart::from_items(items)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Product>::deserialize(deserializer).map(Cart::from)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cart() -> Cart {
        Cart::from_items(vec![
            Product::new(1, 2).with_detail("title", "Runner"),
            Product::new(2, 1).with_detail("title", "Trail"),
        ])
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_from_items_enforces_invariants() {
        let cart = Cart::from_items(vec![
            Product::new(1, 1),
            Product::new(2, 0),
            Product::new(1, 4),
            Product::new(3, -2),
            Product::new(4, 3),
        ]);

        let ids: Vec<u64> = cart.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(cart.find(ProductId::new(1)).unwrap().amount, 1);
    }

    #[test]
    fn test_with_added_appends() {
        let cart = sample_cart();
        let next = cart.with_added(Product::new(3, 1)).unwrap();

        assert_eq!(next.len(), 3);
        assert_eq!(next.items().last().unwrap().id, ProductId::new(3));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_with_added_rejects_duplicates_and_empty_amounts() {
        let cart = sample_cart();

        assert_eq!(
            cart.with_added(Product::new(1, 1)),
            Err(CommerceError::DuplicateItem(ProductId::new(1)))
        );
        assert_eq!(
            cart.with_added(Product::new(9, 0)),
            Err(CommerceError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_with_amount_keeps_position() {
        let cart = sample_cart();
        let next = cart.with_amount(ProductId::new(1), 5).unwrap();

        assert_eq!(next.position(ProductId::new(1)), Some(0));
        assert_eq!(next.find(ProductId::new(1)).unwrap().amount, 5);
        assert_eq!(next.find(ProductId::new(1)).unwrap().title(), Some("Runner"));
        assert_eq!(cart.find(ProductId::new(1)).unwrap().amount, 2);
    }

    #[test]
    fn test_with_amount_missing_item() {
        let cart = sample_cart();
        assert_eq!(
            cart.with_amount(ProductId::new(42), 1),
            Err(CommerceError::ItemNotInCart(ProductId::new(42)))
        );
        assert_eq!(
            cart.with_amount(ProductId::new(1), 0),
            Err(CommerceError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_with_incremented() {
        let cart = sample_cart();
        let next = cart.with_incremented(ProductId::new(2)).unwrap();

        assert_eq!(next.find(ProductId::new(2)).unwrap().amount, 2);
        assert_eq!(next.item_count(), 4);
    }

    #[test]
    fn test_without() {
        let cart = sample_cart();
        let next = cart.without(ProductId::new(1)).unwrap();

        assert!(!next.contains(ProductId::new(1)));
        assert_eq!(next.len(), 1);
        assert!(cart.without(ProductId::new(42)).is_err());
    }

    #[test]
    fn test_serializes_as_array() {
        let cart = Cart::from_items(vec![Product::new(1, 2)]);
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"[{"id":1,"amount":2}]"#);

        let decoded: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_decoding_drops_invalid_line_items() {
        let cart: Cart = serde_json::from_str(
            r#"[{"id":1,"amount":0},{"id":2,"amount":1},{"id":2,"amount":3},{"id":3,"amount":-1}]"#,
        )
        .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.find(ProductId::new(2)).unwrap().amount, 1);
        assert!(!cart.contains(ProductId::new(1)));
    }
}
