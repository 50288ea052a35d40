//! Cart operation errors.

use stride_cache::CacheError;
use stride_commerce::{CommerceError, ProductId};
use stride_data::FetchError;
use thiserror::Error;

/// Why a cart operation did not go through.
#[derive(Error, Debug)]
pub enum CartError {
    /// The catalog API could not be reached or answered with an error.
    #[error("Catalog request failed: {0}")]
    Fetch(#[from] FetchError),

    /// The requested quantity exceeds available stock.
    #[error("Out of stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The product has no line-item in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// The persisted mirror could not be written.
    #[error("Failed to persist cart: {0}")]
    Storage(#[from] CacheError),

    /// A cart transformation rejected the change.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

impl CartError {
    /// Fieldless discriminant, used to pick notification messages.
    pub fn kind(&self) -> CartErrorKind {
        match self {
            CartError::Fetch(_) => CartErrorKind::Fetch,
            CartError::OutOfStock { .. } => CartErrorKind::OutOfStock,
            CartError::NotFound(_) => CartErrorKind::NotFound,
            CartError::Storage(_) => CartErrorKind::Storage,
            CartError::Commerce(CommerceError::ItemNotInCart(_)) => CartErrorKind::NotFound,
            CartError::Commerce(_) => CartErrorKind::Invalid,
        }
    }
}

/// Kind of a [`CartError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartErrorKind {
    Fetch,
    OutOfStock,
    NotFound,
    Storage,
    Invalid,
}

impl CartErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartErrorKind::Fetch => "fetch",
            CartErrorKind::OutOfStock => "out_of_stock",
            CartErrorKind::NotFound => "not_found",
            CartErrorKind::Storage => "storage",
            CartErrorKind::Invalid => "invalid",
        }
    }
}
