//! Transaction lifecycle against PostgreSQL.
//!
//! Create and update pair a stock mutation with the transaction row mutation
//! inside one store transaction. The food row is read under `FOR UPDATE` so
//! concurrent debits against the same food serialize instead of both reading
//! stale stock.

use crate::error::AppError;
use crate::models::{Food, Transaction, TransactionRequest};
use chrono::Utc;
use sqlx::{PgPool, Postgres};

/// Stock level and total price to write, computed before any mutation.
#[derive(Debug)]
struct StockPlan {
    new_stock: i32,
    total_price: i32,
}

/// Debit plan for a new transaction. Fails when stock < qty.
fn plan_create(food: &Food, qty: i32) -> Result<StockPlan, AppError> {
    if food.stock < qty {
        return Err(AppError::InsufficientStock {
            available: food.stock,
            requested: qty,
        });
    }
    Ok(StockPlan {
        new_stock: food.stock - qty,
        total_price: food.price * qty,
    })
}

/// Delta plan for an updated transaction: increasing qty debits more,
/// decreasing credits back. Fails when the resulting stock would go negative.
fn plan_update(food: &Food, old_qty: i32, new_qty: i32) -> Result<StockPlan, AppError> {
    let delta = new_qty - old_qty;
    let new_stock = food.stock - delta;
    if new_stock < 0 {
        return Err(AppError::InsufficientStock {
            available: food.stock,
            requested: delta,
        });
    }
    Ok(StockPlan {
        new_stock,
        total_price: food.price * new_qty,
    })
}

pub struct TransactionService;

impl TransactionService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Transaction>, AppError> {
        let rows = sqlx::query_as::<_, Transaction>(
            "SELECT id, customer_id, food_id, qty, total_price, created_at \
             FROM transactions ORDER BY id",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Transaction, AppError> {
        sqlx::query_as::<_, Transaction>(
            "SELECT id, customer_id, food_id, qty, total_price, created_at \
             FROM transactions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("transaction {}", id)))
    }

    /// Debit stock and insert the row as one atomic unit. The new row's
    /// total_price is the food's current price × qty; created_at is today.
    pub async fn create(pool: &PgPool, req: &TransactionRequest) -> Result<Transaction, AppError> {
        let mut tx = pool.begin().await?;

        ensure_customer(&mut tx, req.customer_id).await?;
        let food = lock_food(&mut tx, req.food_id).await?;
        let plan = plan_create(&food, req.qty)?;

        write_stock(&mut tx, food.id, plan.new_stock).await?;
        let created = sqlx::query_as::<_, Transaction>(
            "INSERT INTO transactions (customer_id, food_id, qty, total_price, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, customer_id, food_id, qty, total_price, created_at",
        )
        .bind(req.customer_id)
        .bind(req.food_id)
        .bind(req.qty)
        .bind(plan.total_price)
        .bind(Utc::now().date_naive())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(
            id = created.id,
            food_id = food.id,
            new_stock = plan.new_stock,
            "transaction created"
        );
        Ok(created)
    }

    /// Re-delta stock and rewrite the row as one atomic unit. created_at is
    /// never touched. On a concurrency conflict the whole operation rolls
    /// back and existence is re-checked: row gone → NotFound, row still
    /// present → the original failure propagates.
    pub async fn update(pool: &PgPool, id: i32, req: &TransactionRequest) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;

        let existing = sqlx::query_as::<_, Transaction>(
            "SELECT id, customer_id, food_id, qty, total_price, created_at \
             FROM transactions WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("transaction {}", id)))?;

        ensure_customer(&mut tx, req.customer_id).await?;
        let food = lock_food(&mut tx, req.food_id).await?;
        let plan = plan_update(&food, existing.qty, req.qty)?;

        let applied = Self::apply_update(&mut tx, id, food.id, &plan, req).await;
        match applied {
            Ok(()) => match tx.commit().await {
                Ok(()) => Ok(()),
                Err(e) => Err(Self::recheck_conflict(pool, id, e.into()).await),
            },
            Err(e) => {
                tx.rollback().await.ok();
                Err(Self::recheck_conflict(pool, id, e).await)
            }
        }
    }

    /// Remove the row by id. Stock is not credited back.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
        let done = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("transaction {}", id)));
        }
        Ok(())
    }

    async fn apply_update(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        id: i32,
        food_id: i32,
        plan: &StockPlan,
        req: &TransactionRequest,
    ) -> Result<(), AppError> {
        write_stock(tx, food_id, plan.new_stock).await?;
        sqlx::query(
            "UPDATE transactions SET customer_id = $1, food_id = $2, qty = $3, total_price = $4 \
             WHERE id = $5",
        )
        .bind(req.customer_id)
        .bind(req.food_id)
        .bind(req.qty)
        .bind(plan.total_price)
        .bind(id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Update-conflict protocol: a serialization or deadlock failure is
    /// resolved by re-checking existence on a fresh connection. Any other
    /// error passes through unchanged.
    async fn recheck_conflict(pool: &PgPool, id: i32, err: AppError) -> AppError {
        if !err.is_concurrency_conflict() {
            return err;
        }
        match Self::exists(pool, id).await {
            Ok(false) => AppError::NotFound(format!("transaction {}", id)),
            _ => err,
        }
    }

    async fn exists(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM transactions WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}

/// Fetch the food row under a row lock; the lock holds until commit/rollback.
async fn lock_food(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    id: i32,
) -> Result<Food, AppError> {
    sqlx::query_as::<_, Food>("SELECT id, name, price, stock FROM foods WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("food {}", id)))
}

async fn ensure_customer(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    id: i32,
) -> Result<(), AppError> {
    let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
        .bind(id)
        .fetch_one(&mut **tx)
        .await?;
    if !row.0 {
        return Err(AppError::NotFound(format!("customer {}", id)));
    }
    Ok(())
}

async fn write_stock(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    food_id: i32,
    new_stock: i32,
) -> Result<(), AppError> {
    sqlx::query("UPDATE foods SET stock = $1 WHERE id = $2")
        .bind(new_stock)
        .bind(food_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(price: i32, stock: i32) -> Food {
        Food {
            id: 1,
            name: "nasi goreng".into(),
            price,
            stock,
        }
    }

    #[test]
    fn create_plan_debits_and_prices() {
        let plan = plan_create(&food(5, 10), 3).unwrap();
        assert_eq!(plan.new_stock, 7);
        assert_eq!(plan.total_price, 15);
    }

    #[test]
    fn create_plan_allows_exact_stock() {
        let plan = plan_create(&food(5, 10), 10).unwrap();
        assert_eq!(plan.new_stock, 0);
    }

    #[test]
    fn create_plan_rejects_oversell() {
        let err = plan_create(&food(5, 10), 11).unwrap_err();
        assert!(matches!(
            err,
            AppError::InsufficientStock { available: 10, requested: 11 }
        ));
    }

    #[test]
    fn update_plan_debits_the_delta() {
        // Food{stock:7, price:5}, qty 3 → 5: delta +2.
        let plan = plan_update(&food(5, 7), 3, 5).unwrap();
        assert_eq!(plan.new_stock, 5);
        assert_eq!(plan.total_price, 25);
    }

    #[test]
    fn update_plan_credits_on_decrease() {
        let plan = plan_update(&food(5, 5), 5, 2).unwrap();
        assert_eq!(plan.new_stock, 8);
        assert_eq!(plan.total_price, 10);
    }

    #[test]
    fn update_plan_rejects_negative_stock() {
        // Stock 5, qty 5 → 20: delta +15 exceeds stock.
        let err = plan_update(&food(5, 5), 5, 20).unwrap_err();
        assert!(matches!(
            err,
            AppError::InsufficientStock { available: 5, requested: 15 }
        ));
    }

    #[test]
    fn update_plan_prices_from_current_food_price() {
        // Price changed since creation; total follows the current price.
        let plan = plan_update(&food(8, 10), 2, 2).unwrap();
        assert_eq!(plan.new_stock, 10);
        assert_eq!(plan.total_price, 16);
    }
}
