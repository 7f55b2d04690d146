//! # Stockroom API Server
//!
//! Startup sequence: configuration → database (with migrations) →
//! notifier task → axum router → serve until shutdown signal.

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use stockroom_api::auth::JwtManager;
use stockroom_api::config::ApiConfig;
use stockroom_api::notify::{self, LowStockNotifier};
use stockroom_api::{routes, AppState};
use stockroom_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Stockroom API server");

    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        database = %config.database_path,
        smtp_configured = config.smtp.is_some(),
        "Configuration loaded"
    );

    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Connect and migrate
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database ready");

    // Low-stock notifier: consumes post-commit stock events
    let (stock_events, events_rx) = notify::channel();
    tokio::spawn(LowStockNotifier::new(db.clone(), config.smtp.clone()).run(events_rx));

    let state = AppState {
        db,
        jwt: JwtManager::new(config.jwt_secret.clone(), config.token_lifetime_secs),
        stock_events,
    };

    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
