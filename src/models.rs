//! Persisted entity rows and request payloads.
//!
//! Rows carry explicit foreign-key columns; related rows are fetched with
//! explicit lookups, never navigated implicitly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: i32,
    pub name: String,
    /// Unit price in minor currency units.
    pub price: i32,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i32,
    pub customer_id: i32,
    pub food_id: i32,
    pub qty: i32,
    /// Price at time of write × qty; never recomputed when the food price changes.
    pub total_price: i32,
    /// Set once at creation.
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRequest {
    pub name: String,
    pub price: i32,
    pub stock: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub customer_id: i32,
    pub food_id: i32,
    pub qty: i32,
}
