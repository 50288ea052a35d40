//! Catalog module.
//!
//! Contains the product and stock payloads served by the storefront API.

mod product;
mod stock;

pub use product::Product;
pub use stock::Stock;
