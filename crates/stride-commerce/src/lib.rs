//! Cart domain types for Stride.
//!
//! - **Catalog**: products and stock levels as served by the storefront API
//! - **Cart**: an ordered, id-unique list of line-items with pure
//!   transformations (add, set amount, increment, remove)
//!
//! # Example
//!
//! ```rust
//! use stride_commerce::prelude::*;
//!
//! let cart = Cart::new()
//!     .with_added(Product::new(1, 1).with_detail("title", "Runner"))
//!     .unwrap();
//! let cart = cart.with_incremented(ProductId::new(1)).unwrap();
//!
//! assert_eq!(cart.find(ProductId::new(1)).unwrap().amount, 2);
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;

pub use cart::Cart;
pub use catalog::{Product, Stock};
pub use error::CommerceError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::Cart;
    pub use crate::catalog::{Product, Stock};
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
}
