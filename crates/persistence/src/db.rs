//! Database connection pool management.

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

impl DatabaseConfig {
    /// Builds a configuration from the environment.
    ///
    /// Reads `DATABASE_URL` (required) plus the optional pool knobs
    /// `DATABASE_MAX_CONNECTIONS`, `DATABASE_MIN_CONNECTIONS`,
    /// `DATABASE_CONNECT_TIMEOUT_SECS` and `DATABASE_IDLE_TIMEOUT_SECS`.
    /// A `.env` file is honored when present.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            url: std::env::var("DATABASE_URL")?,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", default_max_connections()),
            min_connections: env_or("DATABASE_MIN_CONNECTIONS", default_min_connections()),
            connect_timeout_secs: env_or("DATABASE_CONNECT_TIMEOUT_SECS", default_connect_timeout()),
            idle_timeout_secs: env_or("DATABASE_IDLE_TIMEOUT_SECS", default_idle_timeout()),
        })
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Creates a PostgreSQL connection pool with the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_apply() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"url": "postgres://localhost/clients"}"#).unwrap();
        assert_eq!(config.url, "postgres://localhost/clients");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.idle_timeout_secs, 600);
    }

    #[test]
    fn test_config_overrides_apply() {
        let config: DatabaseConfig = serde_json::from_str(
            r#"{"url": "postgres://localhost/clients", "max_connections": 2}"#,
        )
        .unwrap();
        assert_eq!(config.max_connections, 2);
    }
}
