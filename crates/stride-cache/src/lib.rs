//! Type-safe key-value storage layer for Stride.
//!
//! Provides the string store contract the cart is persisted through, two
//! stores (in-memory and single-file JSON), and a `Cache` wrapper that
//! handles JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stride_cache::{cache_key, Cache, FileStore};
//!
//! let store = Arc::new(FileStore::open("storage.json")?);
//! let cache = Cache::new(store);
//!
//! // Store a value
//! cache.set(&cache_key!("stride", "cart"), &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = cache.get(&cache_key!("stride", "cart"))?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, MemoryStore, Storage};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, Storage};
}
