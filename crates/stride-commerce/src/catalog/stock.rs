//! Stock level type.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Quantity of a product available to sell.
///
/// Always fetched fresh from the stock endpoint; never cached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product this stock level belongs to.
    pub id: ProductId,
    /// Units available.
    pub amount: i64,
}

impl Stock {
    /// Create a stock level.
    pub fn new(id: u64, amount: i64) -> Self {
        Self {
            id: ProductId::new(id),
            amount,
        }
    }

    /// Check if `quantity` units can be held in a cart.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.amount
    }

    /// Check if one more unit can be added on top of `current`.
    pub fn allows_increment(&self, current: i64) -> bool {
        current < self.amount
    }
}
