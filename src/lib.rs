//! Restaurant REST backend: customers, foods, and stock-consistent transactions.

pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod state;
pub mod store;
pub mod service;
pub mod handlers;
pub mod routes;

pub use config::Config;
pub use error::AppError;
pub use response::{created, success_many, success_one_ok};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
pub use service::{CustomerService, FoodService, TransactionService};
pub use routes::{api_routes, common_routes};
