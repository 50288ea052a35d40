//! Product type as served by the catalog API and stored in the cart.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product, doubling as a cart line-item.
///
/// Only `id` and `amount` carry meaning for the cart. Everything else the
/// API sends (title, price, image, ...) is kept verbatim in `details` and
/// written back out unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Quantity of this product in the cart. The catalog payload has none,
    /// so it decodes as 0 until the product is placed in a cart.
    #[serde(default)]
    pub amount: i64,
    /// Display fields, opaque to cart logic.
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product with no display fields.
    pub fn new(id: u64, amount: i64) -> Self {
        Self {
            id: ProductId::new(id),
            amount,
            details: serde_json::Map::new(),
        }
    }

    /// Attach a display field.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Copy of this product carrying a different amount.
    pub fn with_amount(&self, amount: i64) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// Product title, if the catalog provided one.
    pub fn title(&self) -> Option<&str> {
        self.details.get("title").and_then(|v| v.as_str())
    }

    /// Unit price, if the catalog provided a numeric one.
    pub fn price(&self) -> Option<f64> {
        self.details.get("price").and_then(|v| v.as_f64())
    }
}
