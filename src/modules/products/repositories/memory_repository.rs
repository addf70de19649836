//! In-memory product store.
//!
//! Behaves like [`MySqlProductRepository`](super::MySqlProductRepository):
//! ids are assigned on insert, saving a product with an id only updates an
//! existing entry, and `save_all` applies the whole batch under one write lock
//! or nothing at all. Write failures can be injected to exercise rollback
//! paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::product_repository::missing_product;
use super::ProductRepository;
use crate::core::{AppError, Result};
use crate::modules::products::models::Product;

#[derive(Debug)]
pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<i64, Product>>,
    next_id: AtomicI64,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            fail_writes: AtomicBool::new(false),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Make every following write fail until switched off again
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of read operations served so far
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of write operations attempted so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn begin_write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::internal("Product store rejected the write"));
        }
        Ok(())
    }

    /// Resolve the stored form of `product` against `store`
    ///
    /// New products get the next id; products with an id must already exist.
    fn prepare(&self, store: &BTreeMap<i64, Product>, product: &Product) -> Result<Product> {
        let mut saved = product.clone();
        match saved.id {
            Some(id) if !store.contains_key(&id) => return Err(missing_product(id)),
            Some(_) => {}
            None => saved.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst)),
        }
        Ok(saved)
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>> {
        self.record_read();
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        self.record_read();
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>> {
        self.record_read();
        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        self.record_read();
        Ok(self.products.read().await.contains_key(&id))
    }

    async fn save(&self, product: &Product) -> Result<Product> {
        self.begin_write()?;

        let mut store = self.products.write().await;
        let saved = self.prepare(&store, product)?;
        if let Some(id) = saved.id {
            store.insert(id, saved.clone());
        }

        Ok(saved)
    }

    async fn save_all(&self, products: &[Product]) -> Result<Vec<Product>> {
        self.begin_write()?;

        let mut store = self.products.write().await;
        let saved = products
            .iter()
            .map(|p| self.prepare(&store, p))
            .collect::<Result<Vec<_>>>()?;
        for product in &saved {
            if let Some(id) = product.id {
                store.insert(id, product.clone());
            }
        }

        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.begin_write()?;
        self.products.write().await.remove(&id);
        Ok(())
    }
}
