//! Food persistence. Stock mutations from the transaction lifecycle live in
//! the transactions service; these writes set the columns directly.

use crate::error::AppError;
use crate::models::{Food, FoodRequest};
use sqlx::PgPool;

pub struct FoodService;

impl FoodService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Food>, AppError> {
        let rows =
            sqlx::query_as::<_, Food>("SELECT id, name, price, stock FROM foods ORDER BY id")
                .fetch_all(pool)
                .await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Food, AppError> {
        sqlx::query_as::<_, Food>("SELECT id, name, price, stock FROM foods WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("food {}", id)))
    }

    pub async fn create(pool: &PgPool, req: &FoodRequest) -> Result<Food, AppError> {
        let row = sqlx::query_as::<_, Food>(
            "INSERT INTO foods (name, price, stock) VALUES ($1, $2, $3) \
             RETURNING id, name, price, stock",
        )
        .bind(&req.name)
        .bind(req.price)
        .bind(req.stock)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update(pool: &PgPool, id: i32, req: &FoodRequest) -> Result<(), AppError> {
        let done = sqlx::query("UPDATE foods SET name = $1, price = $2, stock = $3 WHERE id = $4")
            .bind(&req.name)
            .bind(req.price)
            .bind(req.stock)
            .bind(id)
            .execute(pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("food {}", id)));
        }
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
        let done = sqlx::query("DELETE FROM foods WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("food {}", id)));
        }
        Ok(())
    }
}
