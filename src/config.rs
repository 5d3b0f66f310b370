//! Server configuration from environment variables.

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL (env: DATABASE_URL).
    pub database_url: String,
    /// Listen address (env: BIND_ADDR).
    pub bind_addr: String,
    /// Pool size (env: PG_MAX_CONNECTIONS).
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/restaurant".into());
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
        let max_connections = std::env::var("PG_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        Config {
            database_url,
            bind_addr,
            max_connections,
        }
    }
}
