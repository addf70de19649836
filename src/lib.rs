//! Product Catalog Service Library
//!
//! CRUD over catalog products plus a bulk price adjustment that applies a
//! percentage change and an optional per-category tax multiplier.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

use actix_web::web;

// Re-export commonly used types
pub use modules::products;

/// Register extractor error handlers and every route of the service
///
/// Callers provide the `web::Data<Arc<ProductService>>` (and, for `/ready`,
/// the `web::Data<MySqlPool>`) themselves.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(middleware::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(middleware::path_error_handler))
        .configure(modules::health::configure)
        .configure(modules::products::controllers::configure);
}
