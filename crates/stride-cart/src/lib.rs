//! Stock-aware cart state manager for Stride.
//!
//! [`CartManager`] owns the shopper's cart. It adds, removes and re-quantifies
//! line-items against live stock from a [`CatalogApi`](stride_data::CatalogApi),
//! mirrors every committed cart to a [`Storage`](stride_cache::Storage), and
//! reports failures through a [`Notifier`] instead of returning them.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stride_cart::prelude::*;
//! use stride_cache::FileStore;
//! use stride_data::HttpCatalog;
//!
//! let mut manager = CartManager::load(
//!     Arc::new(HttpCatalog::new("http://localhost:3333")),
//!     Arc::new(FileStore::open("storage.json")?),
//!     Arc::new(LogNotifier),
//!     CartConfig::default(),
//! );
//!
//! manager.subscribe(|cart| println!("{} items", cart.len()));
//! manager.add_product(ProductId::new(1)).await;
//! manager
//!     .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 3))
//!     .await;
//! manager.remove_product(ProductId::new(1));
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod notify;

pub use config::{CartConfig, NotificationMessages};
pub use error::{CartError, CartErrorKind};
pub use manager::{CartManager, CartOperation, CartOutcome, SubscriptionId, UpdateProductAmount};
pub use notify::{
    FanOutNotifier, LogNotifier, Notification, NotificationLevel, Notifier, RecordingNotifier,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartConfig, CartError, CartErrorKind, CartManager, CartOutcome, FanOutNotifier, LogNotifier,
        Notification, NotificationLevel, Notifier, RecordingNotifier, UpdateProductAmount,
    };
    pub use stride_commerce::{Cart, Product, ProductId, Stock};
}
