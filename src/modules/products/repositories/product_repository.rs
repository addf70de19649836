// ProductRepository: the record store behind the product service
//
// Implements:
// - Lookups by id, by category, and full listing
// - Existence checks used before update/delete
// - Insert of new products, update of existing ones
// - Batched save inside one transaction (all rows or none)
// - Delete by id
//
// Saving a product that carries an id never creates a row: the row is locked
// with SELECT ... FOR UPDATE and must still exist, otherwise the save fails
// with NotFound and the transaction rolls back.

use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::products::models::Product;

/// Persistence operations for products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>>;

    async fn exists_by_id(&self, id: i64) -> Result<bool>;

    /// Insert when `id` is `None`, otherwise update the existing row.
    /// Fails with `NotFound` if the row with that id no longer exists.
    async fn save(&self, product: &Product) -> Result<Product>;

    /// Save every product atomically; on error (including a vanished id) no
    /// row is changed
    async fn save_all(&self, products: &[Product]) -> Result<Vec<Product>>;

    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

/// Error returned when a product to update has disappeared from the store
pub(crate) fn missing_product(id: i64) -> AppError {
    AppError::not_found(format!("Product not found with id: {}", id))
}

/// MySQL-backed product repository
#[derive(Clone)]
pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert or update a product within an existing transaction
    async fn save_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        product: &Product,
    ) -> Result<Product> {
        match product.id {
            Some(id) => {
                self.update_with_tx(tx, id, product).await?;
                Ok(product.clone())
            }
            None => {
                let id = self.insert_with_tx(tx, product).await?;
                let mut saved = product.clone();
                saved.id = Some(id);
                Ok(saved)
            }
        }
    }

    async fn insert_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        product: &Product,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, stock_quantity, category)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(&product.category)
        .execute(&mut **tx)
        .await?;

        i64::try_from(result.last_insert_id()).map_err(|_| {
            AppError::internal(format!(
                "Generated product id {} is out of range",
                result.last_insert_id()
            ))
        })
    }

    async fn update_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        id: i64,
        product: &Product,
    ) -> Result<()> {
        // Lock the row so a concurrent delete cannot slip in before the update
        let locked: Option<i64> =
            sqlx::query_scalar("SELECT id FROM products WHERE id = ? FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut **tx)
                .await?;

        if locked.is_none() {
            return Err(missing_product(id));
        }

        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, price = ?, stock_quantity = ?, category = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(&product.category)
        .bind(id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, stock_quantity, category
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, stock_quantity, category
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, stock_quantity, category
            FROM products
            WHERE category = ?
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn save(&self, product: &Product) -> Result<Product> {
        let mut tx = self.pool.begin().await?;
        let saved = self.save_with_tx(&mut tx, product).await?;
        tx.commit().await?;

        Ok(saved)
    }

    async fn save_all(&self, products: &[Product]) -> Result<Vec<Product>> {
        let mut tx = self.pool.begin().await?;

        let mut saved = Vec::with_capacity(products.len());
        for product in products {
            // Dropping `tx` on error rolls the whole batch back
            saved.push(self.save_with_tx(&mut tx, product).await?);
        }

        tx.commit().await?;

        tracing::debug!(count = saved.len(), "Saved product batch");
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(product_id = id, "Delete matched no product");
        }

        Ok(())
    }
}
