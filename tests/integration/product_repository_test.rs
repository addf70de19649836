//! Integration tests for the MySQL product repository
//!
//! Needs a MySQL database named by TEST_DATABASE_URL (strict SQL mode, the
//! server default). Each test returns early when the variable is unset.

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use product_catalog::core::AppError;
use product_catalog::products::{MySqlProductRepository, Product, ProductRepository};
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_save_and_find_round_trip() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let repo = MySqlProductRepository::new(pool);
    let category = unique_category("ROUNDTRIP");

    let mut product = Product::new("Desk Lamp", Some(dec!(25.50)), &category)
        .with_stock_quantity(12);
    product.description = Some("Warm white".to_string());
    let saved = repo.save(&product).await.unwrap();

    let id = saved.id.expect("id assigned on insert");
    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Desk Lamp");
    assert_eq!(stored.description.as_deref(), Some("Warm white"));
    assert_eq!(stored.price, Some(dec!(25.50)));
    assert_eq!(stored.price.unwrap().to_string(), "25.50");
    assert_eq!(stored.stock_quantity, 12);
    assert!(repo.exists_by_id(id).await.unwrap());
}

#[tokio::test]
async fn test_absent_price_is_stored_as_null() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let repo = MySqlProductRepository::new(pool);
    let category = unique_category("NULLPRICE");

    let saved = repo
        .save(&Product::new("Sample", None, &category))
        .await
        .unwrap();

    let stored = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.price, None);
}

#[tokio::test]
async fn test_find_by_category_filters_exactly() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let repo = MySqlProductRepository::new(pool);
    let category = unique_category("FILTER");
    let other = unique_category("OTHER");

    let first = repo
        .save(&Product::new("First", Some(dec!(1.00)), &category))
        .await
        .unwrap();
    repo.save(&Product::new("Elsewhere", Some(dec!(2.00)), &other))
        .await
        .unwrap();
    let second = repo
        .save(&Product::new("Second", Some(dec!(3.00)), &category))
        .await
        .unwrap();

    let found = repo.find_by_category(&category).await.unwrap();
    assert_eq!(
        found.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );
}

#[tokio::test]
async fn test_save_all_updates_every_row() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let repo = MySqlProductRepository::new(pool);
    let category = unique_category("BATCH");

    let mut one = repo
        .save(&Product::new("One", Some(dec!(10.00)), &category))
        .await
        .unwrap();
    let mut two = repo
        .save(&Product::new("Two", None, &category))
        .await
        .unwrap();

    one.price = Some(dec!(11.00));
    two.price = Some(dec!(0.00));
    repo.save_all(&[one.clone(), two.clone()]).await.unwrap();

    let stored = repo.find_by_category(&category).await.unwrap();
    assert_eq!(stored, vec![one, two]);
}

#[tokio::test]
async fn test_failed_row_rolls_back_whole_batch() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let repo = MySqlProductRepository::new(pool);
    let category = unique_category("ROLLBACK");

    let mut one = repo
        .save(&Product::new("One", Some(dec!(10.00)), &category))
        .await
        .unwrap();
    let mut two = repo
        .save(&Product::new("Two", Some(dec!(20.00)), &category))
        .await
        .unwrap();

    // DECIMAL(19,2) holds 17 integer digits; the second row cannot be written
    one.price = Some(dec!(11.00));
    two.price = Some(dec!(1000000000000000000.00));
    let result = repo.save_all(&[one, two]).await;

    assert!(matches!(result, Err(AppError::Database(_))));
    let prices: Vec<_> = repo
        .find_by_category(&category)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.price)
        .collect();
    assert_eq!(prices, vec![Some(dec!(10.00)), Some(dec!(20.00))]);
}

#[tokio::test]
async fn test_save_all_does_not_recreate_deleted_row() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let repo = MySqlProductRepository::new(pool);
    let category = unique_category("DELETED");

    let mut kept = repo
        .save(&Product::new("Kept", Some(dec!(5.00)), &category))
        .await
        .unwrap();
    let mut gone = repo
        .save(&Product::new("Gone", Some(dec!(6.00)), &category))
        .await
        .unwrap();
    let gone_id = gone.id.unwrap();
    repo.delete_by_id(gone_id).await.unwrap();

    kept.price = Some(dec!(50.00));
    gone.price = Some(dec!(60.00));
    let err = repo.save_all(&[kept, gone]).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(!repo.exists_by_id(gone_id).await.unwrap());
    let stored = repo.find_by_category(&category).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].price, Some(dec!(5.00)));
}

#[tokio::test]
async fn test_save_with_missing_id_is_not_found() {
    let Some(pool) = create_test_pool().await else {
        return;
    };
    let repo = MySqlProductRepository::new(pool);
    let category = unique_category("MISSING");

    let saved = repo
        .save(&Product::new("Temp", Some(dec!(1.00)), &category))
        .await
        .unwrap();
    repo.delete_by_id(saved.id.unwrap()).await.unwrap();

    let result = repo.save(&saved).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(repo.find_by_category(&category).await.unwrap().is_empty());
}
