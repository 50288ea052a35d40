//! End-to-end behavior of the cart manager against in-memory collaborators.

use std::sync::Arc;

use stride_cache::{MemoryStore, Storage};
use stride_cart::prelude::*;
use stride_data::InMemoryCatalog;

const KEY: &str = "stride:cart";

struct Shop {
    catalog: Arc<InMemoryCatalog>,
    store: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
    manager: CartManager,
}

impl Shop {
    fn new() -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        for (id, title, stock) in [(1, "Runner", 5), (2, "Trail", 3), (3, "Court", 2)] {
            catalog.insert(
                Product::new(id, 0)
                    .with_detail("title", title)
                    .with_detail("price", 179.9),
                stock,
            );
        }
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let manager = CartManager::load(
            catalog.clone(),
            store.clone(),
            notifier.clone(),
            CartConfig::default(),
        );
        Self {
            catalog,
            store,
            notifier,
            manager,
        }
    }

    fn stored(&self) -> Option<String> {
        self.store.get(KEY).unwrap()
    }

    fn stored_cart(&self) -> Cart {
        serde_json::from_str(&self.stored().unwrap()).unwrap()
    }

    fn amount(&self, id: u64) -> Option<i64> {
        self.manager.cart().find(ProductId::new(id)).map(|p| p.amount)
    }

    async fn fill(&mut self, items: &[(u64, i64)]) {
        for &(id, amount) in items {
            self.manager.add_product(ProductId::new(id)).await;
            if amount > 1 {
                self.manager
                    .update_product_amount(UpdateProductAmount::new(ProductId::new(id), amount))
                    .await;
            }
        }
        self.notifier.take();
    }
}

#[tokio::test]
async fn non_positive_amounts_are_ignored() {
    let mut shop = Shop::new();
    shop.fill(&[(1, 2)]).await;
    let stored_before = shop.stored();
    let calls_before = shop.catalog.call_count();

    for amount in [0, -5] {
        let outcome = shop
            .manager
            .update_product_amount(UpdateProductAmount::new(ProductId::new(1), amount))
            .await;
        assert_eq!(outcome, CartOutcome::Unchanged);
    }

    assert_eq!(shop.amount(1), Some(2));
    assert_eq!(shop.stored(), stored_before);
    assert_eq!(shop.catalog.call_count(), calls_before);
    assert!(shop.notifier.is_empty());
}

#[tokio::test]
async fn adding_new_product_creates_single_unit_line() {
    let mut shop = Shop::new();

    shop.manager.add_product(ProductId::new(3)).await;

    let cart = shop.manager.cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(shop.amount(3), Some(1));
    assert_eq!(cart.find(ProductId::new(3)).unwrap().title(), Some("Court"));
    assert_eq!(shop.stored().unwrap(), serde_json::to_string(cart).unwrap());
}

#[tokio::test]
async fn stock_is_a_ceiling_for_repeated_adds() {
    let mut shop = Shop::new();

    for expected in 1..=5 {
        let outcome = shop.manager.add_product(ProductId::new(1)).await;
        assert_eq!(outcome, CartOutcome::Updated);
        assert_eq!(shop.amount(1), Some(expected));
    }

    let outcome = shop.manager.add_product(ProductId::new(1)).await;

    assert_eq!(outcome, CartOutcome::Failed(CartErrorKind::OutOfStock));
    assert_eq!(shop.amount(1), Some(5));
    assert_eq!(shop.stored_cart().find(ProductId::new(1)).unwrap().amount, 5);
    assert_eq!(
        shop.notifier.messages(),
        vec!["Requested quantity is out of stock"]
    );
}

#[tokio::test]
async fn update_above_stock_is_rejected() {
    let mut shop = Shop::new();
    shop.fill(&[(2, 1)]).await;

    let outcome = shop
        .manager
        .update_product_amount(UpdateProductAmount::new(ProductId::new(2), 4))
        .await;
    assert_eq!(outcome, CartOutcome::Failed(CartErrorKind::OutOfStock));
    assert_eq!(shop.amount(2), Some(1));

    let outcome = shop
        .manager
        .update_product_amount(UpdateProductAmount::new(ProductId::new(2), 3))
        .await;
    assert_eq!(outcome, CartOutcome::Updated);
    assert_eq!(shop.amount(2), Some(3));
}

#[tokio::test]
async fn stock_is_read_fresh_on_every_call() {
    let mut shop = Shop::new();
    shop.fill(&[(1, 2)]).await;

    shop.catalog.set_stock(ProductId::new(1), 2);
    assert_eq!(
        shop.manager.add_product(ProductId::new(1)).await,
        CartOutcome::Failed(CartErrorKind::OutOfStock)
    );

    shop.catalog.set_stock(ProductId::new(1), 10);
    assert_eq!(
        shop.manager.add_product(ProductId::new(1)).await,
        CartOutcome::Updated
    );
    assert_eq!(shop.amount(1), Some(3));
}

#[tokio::test]
async fn removed_product_is_absent_everywhere() {
    let mut shop = Shop::new();
    shop.fill(&[(1, 1), (2, 2)]).await;

    let outcome = shop.manager.remove_product(ProductId::new(1));

    assert_eq!(outcome, CartOutcome::Updated);
    assert!(shop.manager.cart().find(ProductId::new(1)).is_none());
    assert!(shop.stored_cart().find(ProductId::new(1)).is_none());
    assert_eq!(shop.stored_cart().len(), 1);
}

#[tokio::test]
async fn removing_missing_product_notifies_and_changes_nothing() {
    let mut shop = Shop::new();
    shop.fill(&[(2, 1)]).await;
    let before = shop.manager.cart().clone();
    let stored_before = shop.stored();

    let outcome = shop.manager.remove_product(ProductId::new(1));

    assert_eq!(outcome, CartOutcome::Failed(CartErrorKind::NotFound));
    assert_eq!(shop.manager.cart(), &before);
    assert_eq!(shop.stored(), stored_before);
    assert_eq!(shop.notifier.messages(), vec!["Error removing product"]);
}

#[tokio::test]
async fn storage_mirrors_memory_after_each_mutation() {
    let mut shop = Shop::new();

    shop.manager.add_product(ProductId::new(1)).await;
    assert_eq!(&shop.stored_cart(), shop.manager.cart());

    shop.manager.add_product(ProductId::new(2)).await;
    assert_eq!(&shop.stored_cart(), shop.manager.cart());

    shop.manager.add_product(ProductId::new(1)).await;
    assert_eq!(&shop.stored_cart(), shop.manager.cart());

    shop.manager
        .update_product_amount(UpdateProductAmount::new(ProductId::new(2), 3))
        .await;
    assert_eq!(&shop.stored_cart(), shop.manager.cart());

    shop.manager.remove_product(ProductId::new(1));
    assert_eq!(&shop.stored_cart(), shop.manager.cart());

    assert_eq!(shop.store.write_count(), 5);
}

#[tokio::test]
async fn api_failure_leaves_state_untouched() {
    let mut shop = Shop::new();
    shop.fill(&[(1, 2)]).await;
    let before = shop.manager.cart().clone();
    let stored_before = shop.stored();

    shop.catalog.set_unavailable(true);
    let add_existing = shop.manager.add_product(ProductId::new(1)).await;
    let add_new = shop.manager.add_product(ProductId::new(2)).await;
    let update = shop
        .manager
        .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 3))
        .await;

    assert_eq!(add_existing, CartOutcome::Failed(CartErrorKind::Fetch));
    assert_eq!(add_new, CartOutcome::Failed(CartErrorKind::Fetch));
    assert_eq!(update, CartOutcome::Failed(CartErrorKind::Fetch));
    assert_eq!(shop.manager.cart(), &before);
    assert_eq!(shop.stored(), stored_before);
    assert_eq!(
        shop.notifier.messages(),
        vec![
            "Error adding product",
            "Error adding product",
            "Error changing product quantity",
        ]
    );
}

#[tokio::test]
async fn reloading_restores_the_persisted_cart() {
    let mut shop = Shop::new();
    shop.fill(&[(1, 2), (3, 1)]).await;

    let reloaded = CartManager::load(
        shop.catalog.clone(),
        shop.store.clone(),
        shop.notifier.clone(),
        CartConfig::default(),
    );

    assert_eq!(reloaded.cart(), shop.manager.cart());
    assert!(shop.notifier.is_empty());
}

#[tokio::test]
async fn localized_messages_are_used() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let mut config = CartConfig::default();
    config.storage_key = "@RocketShoes:cart".to_string();
    config.messages.add_failed = "Erro na adição do produto".to_string();

    let store = Arc::new(MemoryStore::new());
    let mut manager = CartManager::load(catalog, store.clone(), notifier.clone(), config);

    manager.add_product(ProductId::new(1)).await;

    assert_eq!(notifier.messages(), vec!["Erro na adição do produto"]);
    assert_eq!(store.get("@RocketShoes:cart").unwrap(), None);
}
