//! Resource routes. Handlers receive the raw id segment and parse it
//! themselves so a malformed id maps to a 400, not an extractor rejection.

use crate::handlers::{customers, foods, transactions};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/customers", get(customers::list).post(customers::create))
        .route(
            "/customers/:id",
            get(customers::read)
                .put(customers::update)
                .delete(customers::delete),
        )
        .route("/foods", get(foods::list).post(foods::create))
        .route(
            "/foods/:id",
            get(foods::read).put(foods::update).delete(foods::delete),
        )
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/:id",
            get(transactions::read)
                .put(transactions::update)
                .delete(transactions::delete),
        )
        .with_state(state)
}
