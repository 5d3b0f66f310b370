//! Customer persistence. Phone is unique; a duplicate surfaces as Conflict,
//! as does deleting a customer still referenced by transactions.

use crate::error::AppError;
use crate::models::{Customer, CustomerRequest};
use sqlx::PgPool;

pub struct CustomerService;

impl CustomerService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Customer>, AppError> {
        let rows =
            sqlx::query_as::<_, Customer>("SELECT id, name, phone FROM customers ORDER BY id")
                .fetch_all(pool)
                .await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>("SELECT id, name, phone FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("customer {}", id)))
    }

    pub async fn create(pool: &PgPool, req: &CustomerRequest) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, phone) VALUES ($1, $2) RETURNING id, name, phone",
        )
        .bind(&req.name)
        .bind(&req.phone)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update(pool: &PgPool, id: i32, req: &CustomerRequest) -> Result<(), AppError> {
        let done = sqlx::query("UPDATE customers SET name = $1, phone = $2 WHERE id = $3")
            .bind(&req.name)
            .bind(&req.phone)
            .bind(id)
            .execute(pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("customer {}", id)));
        }
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
        let done = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("customer {}", id)));
        }
        Ok(())
    }
}
