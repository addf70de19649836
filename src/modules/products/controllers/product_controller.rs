use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::{AppError, Result};
use crate::modules::products::models::{BulkPriceChangeRequest, Product};
use crate::modules::products::services::ProductService;

/// List all products
/// GET /products
pub async fn list_products(service: web::Data<Arc<ProductService>>) -> Result<HttpResponse> {
    let products = service.get_all_products().await?;

    Ok(HttpResponse::Ok().json(products))
}

/// List products in one category
/// GET /products/category/{category}
pub async fn list_products_by_category(
    service: web::Data<Arc<ProductService>>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let category = path.into_inner();
    let products = service.find_products_by_category(&category).await?;

    Ok(HttpResponse::Ok().json(products))
}

/// Get product by ID
/// GET /products/{id}
pub async fn get_product(
    service: web::Data<Arc<ProductService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let product_id = path.into_inner();
    let product = service
        .get_product_by_id(product_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product not found with id: {}", product_id)))?;

    Ok(HttpResponse::Ok().json(product))
}

/// Create a product
/// POST /products
pub async fn create_product(
    service: web::Data<Arc<ProductService>>,
    request: web::Json<Product>,
) -> Result<HttpResponse> {
    let product = service.create_product(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(product))
}

/// Replace a product
/// PUT /products/{id}
pub async fn update_product(
    service: web::Data<Arc<ProductService>>,
    path: web::Path<i64>,
    request: web::Json<Product>,
) -> Result<HttpResponse> {
    let product = service
        .update_product(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(product))
}

/// Delete a product
/// DELETE /products/{id}
pub async fn delete_product(
    service: web::Data<Arc<ProductService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    service.delete_product(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Adjust prices of several products at once
/// POST /products/bulk-price-change
pub async fn bulk_price_change(
    service: web::Data<Arc<ProductService>>,
    request: web::Json<BulkPriceChangeRequest>,
) -> Result<HttpResponse> {
    service
        .apply_bulk_price_change(request.product_ids(), request.percentage, request.include_tax)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure product routes
///
/// Literal segments are registered ahead of `/{id}` so they are not shadowed.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/bulk-price-change", web::post().to(bulk_price_change))
            .route("/category/{category}", web::get().to(list_products_by_category))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
