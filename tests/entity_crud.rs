//! Customer and food CRUD against a live PostgreSQL (skipped when
//! DATABASE_URL is unset).

mod common;

use common::{seed_customer, seed_food, test_pool, unique_phone, ABSENT_ID};
use restaurant_api::models::{CustomerRequest, FoodRequest, TransactionRequest};
use restaurant_api::{AppError, CustomerService, FoodService, TransactionService};

#[tokio::test]
async fn customer_create_get_update_delete() {
    let Some(pool) = test_pool().await else { return };

    let created = CustomerService::create(
        &pool,
        &CustomerRequest {
            name: "Ana".into(),
            phone: unique_phone(),
        },
    )
    .await
    .unwrap();

    let fetched = CustomerService::get(&pool, created.id).await.unwrap();
    assert_eq!(fetched.name, "Ana");

    let new_phone = unique_phone();
    CustomerService::update(
        &pool,
        created.id,
        &CustomerRequest {
            name: "Ana B".into(),
            phone: new_phone.clone(),
        },
    )
    .await
    .unwrap();
    let fetched = CustomerService::get(&pool, created.id).await.unwrap();
    assert_eq!(fetched.name, "Ana B");
    assert_eq!(fetched.phone, new_phone);

    CustomerService::delete(&pool, created.id).await.unwrap();
    let err = CustomerService::get(&pool, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn duplicate_phone_is_a_conflict() {
    let Some(pool) = test_pool().await else { return };
    let phone = unique_phone();

    CustomerService::create(
        &pool,
        &CustomerRequest {
            name: "first".into(),
            phone: phone.clone(),
        },
    )
    .await
    .unwrap();

    let err = CustomerService::create(
        &pool,
        &CustomerRequest {
            name: "second".into(),
            phone,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn deleting_referenced_rows_is_blocked() {
    let Some(pool) = test_pool().await else { return };
    let customer = seed_customer(&pool).await;
    let food = seed_food(&pool, 5, 10).await;

    TransactionService::create(
        &pool,
        &TransactionRequest {
            customer_id: customer,
            food_id: food,
            qty: 1,
        },
    )
    .await
    .unwrap();

    let err = CustomerService::delete(&pool, customer).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    let err = FoodService::delete(&pool, food).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn food_create_get_update_delete() {
    let Some(pool) = test_pool().await else { return };

    let created = FoodService::create(
        &pool,
        &FoodRequest {
            name: "satay".into(),
            price: 12,
            stock: 40,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.price, 12);
    assert_eq!(created.stock, 40);

    FoodService::update(
        &pool,
        created.id,
        &FoodRequest {
            name: "satay ayam".into(),
            price: 14,
            stock: 35,
        },
    )
    .await
    .unwrap();
    let fetched = FoodService::get(&pool, created.id).await.unwrap();
    assert_eq!(fetched.name, "satay ayam");
    assert_eq!(fetched.price, 14);
    assert_eq!(fetched.stock, 35);

    FoodService::delete(&pool, created.id).await.unwrap();
    let err = FoodService::get(&pool, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let Some(pool) = test_pool().await else { return };

    let err = CustomerService::get(&pool, ABSENT_ID).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = FoodService::update(
        &pool,
        ABSENT_ID,
        &FoodRequest {
            name: "x".into(),
            price: 1,
            stock: 1,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = CustomerService::delete(&pool, ABSENT_ID).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
