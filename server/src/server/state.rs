//! Application state for the HTTP server.

use crate::config::Config;
use sqlx::PgPool;

/// State shared across all HTTP handlers.
///
/// Cloned per request; the pool is internally reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool for all persistence.
    pub pool: PgPool,
    /// Loaded configuration.
    pub config: Config,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(pool: PgPool, config: Config) -> Self {
        Self { pool, config }
    }
}
