//! HTTP handlers for customer, food, and transaction endpoints.

pub mod customers;
pub mod foods;
pub mod transactions;

use crate::error::AppError;

/// Path ids are positive integers; anything else is a bad request, not a 404.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    let id: i32 = id_str
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))?;
    if id <= 0 {
        return Err(AppError::BadRequest("invalid id".into()));
    }
    Ok(id)
}
