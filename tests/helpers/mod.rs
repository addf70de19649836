// Test Helper Modules
//
// Shared fixtures for integration and contract tests. Services are wired to
// the in-memory product store so tests run without a database.
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;

#![allow(dead_code)]


pub use test_data::*;
pub use test_database::*;

use std::sync::Arc;

use async_trait::async_trait;
use product_catalog::core::Result;
use product_catalog::products::{
    InMemoryProductRepository, Product, ProductRepository, ProductService, TaxPolicy,
};

/// Tax table used across tests: A = 10%, B = 5%
pub fn test_tax_policy() -> TaxPolicy {
    TaxPolicy::parse("A=1.10,B=1.05").expect("valid test tax policy")
}

/// Build a service over a fresh in-memory store seeded with `products`
///
/// Products get ids 1..=n in the given order.
pub async fn seeded_service(
    products: Vec<Product>,
) -> (Arc<ProductService>, Arc<InMemoryProductRepository>) {
    let repo = Arc::new(InMemoryProductRepository::new());
    for product in &products {
        repo.save(product).await.expect("seed product");
    }

    let service = ProductService::new(repo.clone(), Arc::new(test_tax_policy()));
    (Arc::new(service), repo)
}

/// Snapshot of every stored product, ordered by id
pub async fn snapshot(repo: &InMemoryProductRepository) -> Vec<Product> {
    repo.find_all().await.expect("list products")
}

/// Store wrapper that deletes one product just before each write reaches the
/// inner store, as a concurrent DELETE request would
pub struct DeleteBeforeWrite {
    inner: Arc<InMemoryProductRepository>,
    victim: i64,
}

impl DeleteBeforeWrite {
    pub fn new(inner: Arc<InMemoryProductRepository>, victim: i64) -> Self {
        Self { inner, victim }
    }
}

#[async_trait]
impl ProductRepository for DeleteBeforeWrite {
    async fn find_all(&self) -> Result<Vec<Product>> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>> {
        self.inner.find_by_category(category).await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        self.inner.exists_by_id(id).await
    }

    async fn save(&self, product: &Product) -> Result<Product> {
        self.inner.delete_by_id(self.victim).await?;
        self.inner.save(product).await
    }

    async fn save_all(&self, products: &[Product]) -> Result<Vec<Product>> {
        self.inner.delete_by_id(self.victim).await?;
        self.inner.save_all(products).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.inner.delete_by_id(id).await
    }
}

/// Service over `repo` whose writes race with a delete of `victim`
pub fn racing_delete_service(repo: Arc<InMemoryProductRepository>, victim: i64) -> ProductService {
    ProductService::new(
        Arc::new(DeleteBeforeWrite::new(repo, victim)),
        Arc::new(test_tax_policy()),
    )
}
