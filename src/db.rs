//! Database pool setup and embedded migrations.

use crate::config::PostgresConfig;
use anyhow::Context;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Embedded schema migrations, also used by integration tests to prepare
/// throwaway databases.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Open a connection pool against the configured Postgres instance.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect(config: &PostgresConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect(&config.url)
        .await
        .context("failed to connect to PostgreSQL")
}

/// Run pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("failed to run database migrations")
}
