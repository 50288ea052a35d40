//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors raised by pure cart transformations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product is not a line-item of the cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Product already has a line-item in the cart.
    #[error("Item already in cart: {0}")]
    DuplicateItem(ProductId),

    /// Line-item quantities must be at least one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Arithmetic overflow while adjusting a quantity.
    #[error("Quantity overflow for {0}")]
    Overflow(ProductId),

    /// A product id could not be parsed.
    #[error("Invalid product id: {0}")]
    InvalidProductId(String),
}
