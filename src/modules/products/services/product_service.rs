use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::products::models::{Product, TaxPolicy};
use crate::modules::products::repositories::ProductRepository;

/// Service for product business logic
pub struct ProductService {
    product_repo: Arc<dyn ProductRepository>,
    tax_policy: Arc<TaxPolicy>,
}

impl ProductService {
    pub fn new(product_repo: Arc<dyn ProductRepository>, tax_policy: Arc<TaxPolicy>) -> Self {
        Self {
            product_repo,
            tax_policy,
        }
    }

    /// List every product
    pub async fn get_all_products(&self) -> Result<Vec<Product>> {
        self.product_repo.find_all().await
    }

    /// Get product by ID
    pub async fn get_product_by_id(&self, id: i64) -> Result<Option<Product>> {
        self.product_repo.find_by_id(id).await
    }

    /// List products of one category (exact match)
    pub async fn find_products_by_category(&self, category: &str) -> Result<Vec<Product>> {
        self.product_repo.find_by_category(category).await
    }

    /// Create a new product; any id on the payload is ignored
    pub async fn create_product(&self, mut product: Product) -> Result<Product> {
        product.validate()?;
        product.id = None;

        let created = self.product_repo.save(&product).await?;
        tracing::info!(product_id = ?created.id, category = %created.category, "Product created");

        Ok(created)
    }

    /// Replace an existing product
    pub async fn update_product(&self, id: i64, mut product: Product) -> Result<Product> {
        if !self.product_repo.exists_by_id(id).await? {
            return Err(AppError::not_found(format!(
                "Product not found with id: {}",
                id
            )));
        }

        product.validate()?;
        product.id = Some(id);

        let updated = self.product_repo.save(&product).await?;
        tracing::info!(product_id = id, "Product updated");

        Ok(updated)
    }

    /// Delete a product by ID
    pub async fn delete_product(&self, id: i64) -> Result<()> {
        if !self.product_repo.exists_by_id(id).await? {
            return Err(AppError::not_found(format!(
                "Product not found with id: {}",
                id
            )));
        }

        self.product_repo.delete_by_id(id).await?;
        tracing::info!(product_id = id, "Product deleted");

        Ok(())
    }

    /// Adjust the price of every listed product by `percentage`, optionally
    /// multiplying in the tax rate of each product's category.
    ///
    /// All ids are resolved and every new price is computed before anything
    /// is written; the batch is then persisted with a single `save_all`. Any
    /// failure leaves every price unchanged.
    pub async fn apply_bulk_price_change(
        &self,
        product_ids: &[i64],
        percentage: f64,
        include_tax: bool,
    ) -> Result<()> {
        if product_ids.is_empty() {
            return Err(AppError::validation("Product id list must not be empty"));
        }

        let mut products = Vec::with_capacity(product_ids.len());
        for &id in product_ids {
            let product = self
                .product_repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Product not found: {}", id)))?;
            products.push(product);
        }

        for product in &mut products {
            let tax_rate = if include_tax {
                let rate = self.tax_policy.rate_for(&product.category).ok_or_else(|| {
                    AppError::validation(format!("Unknown tax category: {}", product.category))
                })?;
                Some(rate)
            } else {
                None
            };

            let old_price = product.price;
            let new_price = product.apply_price_change(percentage, tax_rate)?;
            tracing::debug!(
                product_id = ?product.id,
                old_price = ?old_price,
                new_price = %new_price,
                "Price recomputed"
            );
        }

        self.product_repo.save_all(&products).await?;

        tracing::info!(
            count = products.len(),
            percentage,
            include_tax,
            "Bulk price change applied"
        );

        Ok(())
    }
}
