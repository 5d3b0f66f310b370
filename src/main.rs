//! Server entrypoint: env config, database bootstrap, route mounting.

use axum::Router;
use restaurant_api::{
    api_routes, common_routes, ensure_database_exists, ensure_tables, AppState, Config,
};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("restaurant_api=info")),
        )
        .init();

    let config = Config::from_env();
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    ensure_tables(&pool).await?;

    let state = AppState { pool };
    let app = Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
