//! Mutiny Server: cookie sessions with sliding expiry over a document store
//!
//! Main entry point that wires the crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use mutiny_api::{AppState, build_router};
use mutiny_auth::{AuthStore, PasswordHasher, SessionCleanup, SessionStore};
use mutiny_core::config::AppConfig;
use mutiny_core::error::AppError;
use mutiny_database::Collections;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "mutiny-server", version, about = "Mutiny session server")]
struct Cli {
    /// Base configuration file (extension optional).
    #[arg(long, default_value = "config/default")]
    config: String,

    /// Environment overlay loaded from `config/<env>`.
    #[arg(long, default_value = "development")]
    env: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(config = %cli.config, env = %cli.env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Mutiny v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage backend ──────────────────────────────────
    tracing::info!(backend = %config.database.backend, "Opening document store...");
    let collections = Collections::from_config(&config.database).await?;

    // ── Step 2: Stores ───────────────────────────────────────────
    let hasher = PasswordHasher::new(&config.auth)?;
    let auth = Arc::new(AuthStore::new(collections.credentials.clone(), hasher));
    let sessions = Arc::new(SessionStore::new(
        collections.sessions.clone(),
        &config.session,
    ));

    // ── Step 3: Bootstrap administrator ──────────────────────────
    auth.bootstrap_admin(
        &config.auth.bootstrap_admin.username,
        &config.auth.bootstrap_admin.password,
    )
    .await?;

    // ── Step 4: Reset sessions ───────────────────────────────────
    let cleared = sessions.clear_all_sessions().await?;
    tracing::info!(cleared, "Cleared sessions left from a previous run");

    // ── Step 5: Periodic cleanup ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let cleanup_handle = match config.session.cleanup_interval_seconds {
        0 => {
            tracing::info!("Periodic session cleanup disabled");
            None
        }
        secs => Some(
            SessionCleanup::new(Arc::clone(&sessions), Duration::from_secs(secs))
                .spawn(shutdown_rx),
        ),
    };

    // ── Step 6: HTTP server ──────────────────────────────────────
    let app = build_router(AppState::new(sessions, auth));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Mutiny server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 7: Wait for background tasks ────────────────────────
    if let Some(handle) = cleanup_handle {
        let _ = tokio::time::timeout(Duration::from_secs(10), handle).await;
    }
    collections.close().await;

    tracing::info!("Mutiny server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
