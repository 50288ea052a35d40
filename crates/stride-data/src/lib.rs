//! Storefront API client for Stride.
//!
//! This crate provides:
//! - `CatalogApi` - the two catalog reads the cart depends on
//! - `HttpCatalog` - `CatalogApi` over HTTP/JSON
//! - `InMemoryCatalog` - `CatalogApi` backed by maps, with failure injection
//! - `FetchClient` - base-URL aware HTTP client returning buffered responses
//!
//! # Example
//!
//! ```rust,ignore
//! use stride_data::{CatalogApi, HttpCatalog};
//! use stride_commerce::ProductId;
//!
//! let catalog = HttpCatalog::new("http://localhost:3333");
//! let product = catalog.product(ProductId::new(1)).await?;
//! let stock = catalog.stock(ProductId::new(1)).await?;
//! ```

mod catalog;
mod client;
mod error;
mod response;

pub use catalog::{CatalogApi, HttpCatalog, InMemoryCatalog};
pub use client::{ClientRequestBuilder, FetchClient};
pub use error::FetchError;
pub use response::Response;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CatalogApi, FetchClient, FetchError, HttpCatalog, InMemoryCatalog, Response};
}
