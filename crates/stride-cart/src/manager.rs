//! The cart manager.
//!
//! Each public operation snapshots the current cart, optionally reads the
//! catalog, computes the next cart, and commits it. Committing writes the
//! persisted mirror first and only then replaces the in-memory cart, so a
//! failed write leaves both sides as they were.
//!
//! Errors never reach the caller. They are turned into one notification at
//! the operation boundary and reported back as a [`CartOutcome`].

use std::fmt;
use std::sync::Arc;

use stride_cache::{Cache, Storage};
use stride_commerce::{Cart, Product, ProductId};
use stride_data::CatalogApi;
use tracing::{debug, info, instrument, warn};

use crate::config::CartConfig;
use crate::error::{CartError, CartErrorKind};
use crate::notify::{Notification, Notifier};

/// The three cart mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
            Self::UpdateAmount => write!(f, "update_amount"),
        }
    }
}

/// Result of a cart operation as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    /// A new cart was committed.
    Updated,
    /// Nothing to do; no notification was raised.
    Unchanged,
    /// The operation failed and the shopper was notified.
    Failed(CartErrorKind),
}

impl CartOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CartOutcome::Failed(_))
    }
}

/// Arguments of [`CartManager::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

/// Handle returned by [`CartManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&Cart) + Send + Sync>;

/// Holds the shopper's cart and keeps the persisted mirror in sync.
pub struct CartManager {
    cart: Cart,
    catalog: Arc<dyn CatalogApi>,
    cache: Cache,
    notifier: Arc<dyn Notifier>,
    config: CartConfig,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl CartManager {
    /// Create a manager, restoring the cart persisted under
    /// `config.storage_key`.
    ///
    /// A missing entry yields an empty cart. So does an unreadable one, in
    /// which case the shopper gets a warning; the stored text is left alone
    /// until the next successful mutation overwrites it.
    pub fn load(
        catalog: Arc<dyn CatalogApi>,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
        config: CartConfig,
    ) -> Self {
        let cache = Cache::new(storage);

        let cart = match cache.get::<Vec<Product>>(&config.storage_key) {
            Ok(Some(items)) => {
                let stored = items.len();
                let cart = Cart::from_items(items);
                if cart.len() != stored {
                    warn!(
                        key = %config.storage_key,
                        dropped = stored - cart.len(),
                        "ignored invalid line-items in stored cart"
                    );
                }
                cart
            }
            Ok(None) => Cart::new(),
            Err(err) => {
                warn!(key = %config.storage_key, error = %err, "stored cart unreadable, starting empty");
                notifier.notify(Notification::warning(config.messages.cart_unreadable.clone()));
                Cart::new()
            }
        };
        debug!(items = cart.len(), "cart loaded");

        Self {
            cart,
            catalog,
            cache,
            notifier,
            config,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Call `callback` with the new cart after every committed mutation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&Cart) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Stop notifying a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() < before
    }

    /// Put one unit of `product_id` in the cart, or one more if it's
    /// already there and stock allows.
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, product_id: ProductId) -> CartOutcome {
        let result = self.try_add(product_id).await;
        self.finish(CartOperation::Add, result)
    }

    /// Drop the line-item for `product_id`.
    #[instrument(skip(self))]
    pub fn remove_product(&mut self, product_id: ProductId) -> CartOutcome {
        let result = self.try_remove(product_id);
        self.finish(CartOperation::Remove, result)
    }

    /// Set the quantity of an existing line-item.
    ///
    /// Non-positive amounts are ignored without a notification.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&mut self, update: UpdateProductAmount) -> CartOutcome {
        if update.amount <= 0 {
            debug!("ignoring non-positive amount");
            return CartOutcome::Unchanged;
        }

        let result = self.try_update_amount(update).await;
        self.finish(CartOperation::UpdateAmount, result)
    }

    /// Next cart for an add.
    pub async fn try_add(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let current = self.cart.find(product_id).map(|item| item.amount);

        let Some(amount) = current else {
            // First unit goes in without a stock check.
            let product = self.catalog.product(product_id).await?;
            return Ok(self.cart.with_added(product.with_amount(1))?);
        };

        let stock = self.catalog.stock(product_id).await?;
        debug!(amount, available = stock.amount, "stock checked");
        if !stock.allows_increment(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount.saturating_add(1),
                available: stock.amount,
            });
        }

        Ok(self.cart.with_incremented(product_id)?)
    }

    /// Next cart for a remove.
    pub fn try_remove(&self, product_id: ProductId) -> Result<Cart, CartError> {
        if !self.cart.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }
        Ok(self.cart.without(product_id)?)
    }

    /// Next cart for an amount update.
    pub async fn try_update_amount(&self, update: UpdateProductAmount) -> Result<Cart, CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        if !self.cart.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }

        let stock = self.catalog.stock(product_id).await?;
        debug!(amount, available = stock.amount, "stock checked");
        if !stock.can_fulfill(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        Ok(self.cart.with_amount(product_id, amount)?)
    }

    fn finish(&mut self, operation: CartOperation, result: Result<Cart, CartError>) -> CartOutcome {
        match result.and_then(|next| self.commit(next)) {
            Ok(()) => {
                info!(%operation, items = self.cart.len(), units = self.cart.item_count(), "cart updated");
                CartOutcome::Updated
            }
            Err(err) => {
                let kind = err.kind();
                warn!(%operation, kind = kind.as_str(), error = %err, "cart operation failed");
                let message = self.config.messages.for_failure(operation, kind);
                self.notifier.notify(Notification::error(message));
                CartOutcome::Failed(kind)
            }
        }
    }

    fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        self.cache.set(&self.config.storage_key, &next)?;
        self.cart = next;

        for (_, subscriber) in &self.subscribers {
            subscriber(&self.cart);
        }
        Ok(())
    }
}

impl fmt::Debug for CartManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("cart", &self.cart)
            .field("config", &self.config)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
