use std::time::Duration;

use catalog_core::search::{SearchLimits, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use catalog_db::PoolSettings;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Page-size policy for search.
    pub search_limits: SearchLimits,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    /// Per-statement timeout enforced by PostgreSQL (default: `30`).
    pub db_statement_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                    |
    /// |-----------------------------|----------------------------|
    /// | `HOST`                      | `0.0.0.0`                  |
    /// | `PORT`                      | `8000`                     |
    /// | `CORS_ORIGINS`              | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                       |
    /// | `DEFAULT_LIMIT`             | `20`                       |
    /// | `MAX_LIMIT`                 | `100`                      |
    /// | `DB_MAX_CONNECTIONS`        | `10`                       |
    /// | `DB_MIN_CONNECTIONS`        | `1`                        |
    /// | `DB_STATEMENT_TIMEOUT_SECS` | `30`                       |
    ///
    /// Panics on unparsable values or invalid search limits so
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = env_or("PORT", "8000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_limit: i64 = env_or("DEFAULT_LIMIT", &DEFAULT_SEARCH_LIMIT.to_string())
            .parse()
            .expect("DEFAULT_LIMIT must be a valid integer");

        let max_limit: i64 = env_or("MAX_LIMIT", &MAX_SEARCH_LIMIT.to_string())
            .parse()
            .expect("MAX_LIMIT must be a valid integer");

        let search_limits = SearchLimits::new(default_limit, max_limit)
            .unwrap_or_else(|e| panic!("Invalid search limits: {e}"));

        let db_max_connections: u32 = env_or("DB_MAX_CONNECTIONS", "10")
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let db_min_connections: u32 = env_or("DB_MIN_CONNECTIONS", "1")
            .parse()
            .expect("DB_MIN_CONNECTIONS must be a valid u32");

        let db_statement_timeout_secs: u64 = env_or("DB_STATEMENT_TIMEOUT_SECS", "30")
            .parse()
            .expect("DB_STATEMENT_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            search_limits,
            db_max_connections,
            db_min_connections,
            db_statement_timeout_secs,
        }
    }

    /// Pool settings for the given database URL.
    pub fn pool_settings(&self, database_url: &str) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            min_connections: self.db_min_connections.min(self.db_max_connections),
            statement_timeout: Duration::from_secs(self.db_statement_timeout_secs),
            ..PoolSettings::new(database_url)
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
