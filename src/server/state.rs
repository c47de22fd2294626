//! Application state shared across HTTP handlers.

use sqlx::PgPool;

/// Shared resources for the HTTP handlers.
///
/// Cloned cheaply per request; the pool is internally reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the booking database.
    pub pool: PgPool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
