//! Storefront catalog API: product details and stock levels.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use stride_commerce::{Product, ProductId, Stock};

use crate::{FetchClient, FetchError};

/// Read-only access to the storefront catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch a product by id.
    async fn product(&self, id: ProductId) -> Result<Product, FetchError>;

    /// Fetch the current stock level for a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError>;
}

/// Catalog served over HTTP as `GET /products/{id}` and `GET /stock/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: FetchClient,
}

impl HttpCatalog {
    /// Create a catalog client rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(FetchClient::new().with_base_url(base_url))
    }

    /// Use a preconfigured client. Its base URL should point at the API root.
    pub fn with_client(client: FetchClient) -> Self {
        Self { client }
    }

    /// Path of the product endpoint.
    pub fn product_path(id: ProductId) -> String {
        format!("/products/{}", id)
    }

    /// Path of the stock endpoint.
    pub fn stock_path(id: ProductId) -> String {
        format!("/stock/{}", id)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        let product: Product = self.client.get_json(&Self::product_path(id)).await?;
        tracing::debug!(product_id = %id, "fetched product");
        Ok(product)
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        let stock: Stock = self.client.get_json(&Self::stock_path(id)).await?;
        tracing::debug!(product_id = %id, available = stock.amount, "fetched stock");
        Ok(stock)
    }
}

/// In-memory catalog for tests and offline demos.
///
/// Unknown ids answer with `HttpError { status: 404 }`, like the HTTP API.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Mutex<HashMap<ProductId, Product>>,
    stock: Mutex<HashMap<ProductId, i64>>,
    unavailable: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product together with its stock level.
    pub fn with_product(self, product: Product, stock: i64) -> Self {
        self.insert(product, stock);
        self
    }

    /// Register or replace a product together with its stock level.
    pub fn insert(&self, product: Product, stock: i64) {
        let id = product.id;
        if let Ok(mut products) = self.products.lock() {
            products.insert(id, product);
        }
        self.set_stock(id, stock);
    }

    /// Change the stock level of a product.
    pub fn set_stock(&self, id: ProductId, amount: i64) {
        if let Ok(mut stock) = self.stock.lock() {
            stock.insert(id, amount);
        }
    }

    /// Make every request fail with `FetchError::Unavailable` while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of requests received so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin_call(&self, path: String) -> Result<(), FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(FetchError::Unavailable(path));
        }
        Ok(())
    }

    fn not_found(path: String) -> FetchError {
        FetchError::HttpError {
            status: 404,
            message: format!("{} not found", path),
        }
    }

    fn poisoned() -> FetchError {
        FetchError::Unavailable("catalog lock poisoned".to_string())
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        let path = HttpCatalog::product_path(id);
        self.begin_call(path.clone())?;

        let products = self.products.lock().map_err(|_| Self::poisoned())?;
        products
            .get(&id)
            .map(|p| p.with_amount(0))
            .ok_or_else(|| Self::not_found(path))
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        let path = HttpCatalog::stock_path(id);
        self.begin_call(path.clone())?;

        let stock = self.stock.lock().map_err(|_| Self::poisoned())?;
        stock
            .get(&id)
            .map(|amount| Stock { id, amount: *amount })
            .ok_or_else(|| Self::not_found(path))
    }
}
