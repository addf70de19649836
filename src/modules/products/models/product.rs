// Product entity
//
// A product is a catalog record with an optional price and a category used to
// pick its tax rate. The per-record pricing rule lives here so the service
// layer only resolves, orchestrates and persists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::money::{price_from_f64, price_to_f64, validate_price};
use crate::core::{AppError, Result};

/// Represents a catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Assigned by the store on first save
    #[serde(default, skip_deserializing)]
    pub id: Option<i64>,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Unit price; absent prices count as zero when adjusted
    #[serde(default)]
    pub price: Option<Decimal>,

    #[serde(default)]
    pub stock_quantity: i32,

    /// Tax policy key
    pub category: String,
}

impl Product {
    /// Create a product that has not been persisted yet
    pub fn new(
        name: impl Into<String>,
        price: Option<Decimal>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            price,
            stock_quantity: 0,
            category: category.into(),
        }
    }

    pub fn with_stock_quantity(mut self, stock_quantity: i32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    /// Validate fields supplied by a client on create or update
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Product name cannot be empty"));
        }

        if self.category.trim().is_empty() {
            return Err(AppError::validation("Product category cannot be empty"));
        }

        if let Some(price) = self.price {
            validate_price(price).map_err(AppError::Validation)?;
        }

        if self.stock_quantity < 0 {
            return Err(AppError::validation("Stock quantity cannot be negative"));
        }

        Ok(())
    }

    /// Compute the price after a percentage change and an optional tax multiplier.
    ///
    /// `percentage` is a signed percent delta (`10.0` is +10%). The arithmetic
    /// runs in `f64`:
    ///
    /// ```text
    /// changed = base + base * (percentage / 100)
    /// changed = changed * tax_rate            (when a rate is given)
    /// ```
    ///
    /// and the result is rounded half-to-even at 2 decimal places.
    pub fn adjusted_price(&self, percentage: f64, tax_rate: Option<f64>) -> Result<Decimal> {
        let base = match self.price {
            Some(price) => price_to_f64(price)?,
            None => 0.0,
        };

        let mut changed = base + (base * (percentage / 100.0));
        if let Some(rate) = tax_rate {
            changed *= rate;
        }

        price_from_f64(changed)
    }

    /// Apply [`Product::adjusted_price`] in place and return the new price
    pub fn apply_price_change(&mut self, percentage: f64, tax_rate: Option<f64>) -> Result<Decimal> {
        let new_price = self.adjusted_price(percentage, tax_rate)?;
        self.price = Some(new_price);
        Ok(new_price)
    }
}
