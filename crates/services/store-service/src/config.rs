//! Store service configuration.

use std::env;

use common::DatabaseConfig;

/// Store service configuration.
#[derive(Debug, Clone, Default)]
pub struct StoreServiceConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
}

impl StoreServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// `STORE_DATABASE_URL` takes precedence over `DATABASE_URL`; unset or
    /// unparsable values fall back to [`DatabaseConfig::default`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: env::var("STORE_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or(defaults.url),
            max_connections: env::var("STORE_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            min_connections: env::var("STORE_DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_connections),
            sql_logging: env::var("STORE_DB_SQL_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sql_logging),
        };

        Self { database }
    }
}
