use std::sync::Arc;

use catalog_db::SearchService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (the pool is reference-counted, config is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: catalog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Product search, sharing `pool`.
    pub search: SearchService,
}

impl AppState {
    pub fn new(pool: catalog_db::DbPool, config: ServerConfig) -> Self {
        let search = SearchService::new(pool.clone(), config.search_limits);
        Self {
            pool,
            config: Arc::new(config),
            search,
        }
    }
}
