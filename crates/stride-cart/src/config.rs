//! Cart manager configuration.

use serde::{Deserialize, Serialize};
use stride_cache::cache_key;

use crate::error::CartErrorKind;
use crate::manager::CartOperation;

/// Configuration for a [`CartManager`](crate::CartManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Storage key holding the serialized cart.
    pub storage_key: String,

    /// Messages shown to the shopper.
    pub messages: NotificationMessages,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            messages: NotificationMessages::default(),
        }
    }
}

/// Default storage key, `stride:cart`.
pub fn default_storage_key() -> String {
    cache_key!("stride", "cart")
}

/// Shopper-facing messages, one per failure.
///
/// Each operation has a generic message. `out_of_stock` is the only
/// kind-specific one; an empty string falls back to the generic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationMessages {
    pub add_failed: String,
    pub remove_failed: String,
    pub update_failed: String,
    pub out_of_stock: String,
    /// Shown when the saved cart could not be read at startup.
    pub cart_unreadable: String,
}

impl Default for NotificationMessages {
    fn default() -> Self {
        Self {
            add_failed: "Error adding product".to_string(),
            remove_failed: "Error removing product".to_string(),
            update_failed: "Error changing product quantity".to_string(),
            out_of_stock: "Requested quantity is out of stock".to_string(),
            cart_unreadable: "Your saved cart could not be read and was reset".to_string(),
        }
    }
}

impl NotificationMessages {
    /// Generic failure message for an operation.
    pub fn generic(&self, operation: CartOperation) -> &str {
        match operation {
            CartOperation::Add => &self.add_failed,
            CartOperation::Remove => &self.remove_failed,
            CartOperation::UpdateAmount => &self.update_failed,
        }
    }

    /// Message for a failed operation.
    pub fn for_failure(&self, operation: CartOperation, kind: CartErrorKind) -> &str {
        let specific = match kind {
            CartErrorKind::OutOfStock => Some(self.out_of_stock.as_str()),
            _ => None,
        };

        match specific {
            Some(message) if !message.trim().is_empty() => message,
            _ => self.generic(operation),
        }
    }
}
