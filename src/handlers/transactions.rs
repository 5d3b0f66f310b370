//! Transaction endpoints: the stock lifecycle surfaced over HTTP.

use super::parse_id;
use crate::error::AppError;
use crate::models::TransactionRequest;
use crate::response::{created, success_many, success_one_ok};
use crate::service::TransactionService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = TransactionService::list(&state.pool).await?;
    Ok(success_many(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = TransactionService::get(&state.pool, id).await?;
    Ok(success_one_ok(row))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<TransactionRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;
    let row = TransactionService::create(&state.pool, &req).await?;
    Ok(created(format!("/transactions/{}", row.id), row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(req): Json<TransactionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    req.validate()?;
    TransactionService::update(&state.pool, id, &req).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    TransactionService::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
