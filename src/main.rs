//! Booking service server binary.
//!
//! Connects to Postgres, applies migrations and serves the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Start infrastructure
//! docker compose up -d
//!
//! # Run server
//! cargo run
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use train_station::{AppState, Config, build_router, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,train_station=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(postgres = %config.postgres.url, "Configuration loaded");

    let pool = db::connect(&config.postgres).await?;
    db::migrate(&pool).await?;
    tracing::info!("Database ready");

    let router = build_router(AppState::new(pool));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Booking service listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to install Ctrl+C handler");
    }
}
