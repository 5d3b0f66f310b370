//! Shared helpers for the DB-backed suites. Every test skips when
//! DATABASE_URL is unset so the suite can run without a local PostgreSQL.
#![allow(dead_code)]

use restaurant_api::{ensure_database_exists, ensure_tables};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping");
        return None;
    };
    ensure_database_exists(&url).await.expect("create database");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect");
    ensure_tables(&pool).await.expect("bootstrap tables");
    Some(pool)
}

static SEQ: AtomicU32 = AtomicU32::new(0);

/// Phone numbers are unique in the schema; derive one per call.
pub fn unique_phone() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let seq = SEQ.fetch_add(1, Ordering::Relaxed) % 1000;
    format!("08{:09}{:03}", nanos, seq)
}

pub async fn seed_customer(pool: &PgPool) -> i32 {
    sqlx::query_scalar("INSERT INTO customers (name, phone) VALUES ($1, $2) RETURNING id")
        .bind("seed customer")
        .bind(unique_phone())
        .fetch_one(pool)
        .await
        .expect("seed customer")
}

pub async fn seed_food(pool: &PgPool, price: i32, stock: i32) -> i32 {
    sqlx::query_scalar("INSERT INTO foods (name, price, stock) VALUES ($1, $2, $3) RETURNING id")
        .bind("seed food")
        .bind(price)
        .bind(stock)
        .fetch_one(pool)
        .await
        .expect("seed food")
}

pub async fn food_stock(pool: &PgPool, id: i32) -> i32 {
    sqlx::query_scalar("SELECT stock FROM foods WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("read stock")
}

/// An id no seeded row will ever reach.
pub const ABSENT_ID: i32 = 2_000_000_000;
