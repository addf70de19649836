// Products module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{BulkPriceChangeRequest, Product, TaxPolicy};
pub use repositories::{InMemoryProductRepository, MySqlProductRepository, ProductRepository};
pub use services::ProductService;
