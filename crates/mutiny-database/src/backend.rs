//! Backend selection for the two logical collections.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

use mutiny_core::config::DatabaseConfig;
use mutiny_core::error::{AppError, ErrorKind};
use mutiny_core::result::AppResult;
use mutiny_core::traits::Collection;
use mutiny_entity::{Credential, Session};

use crate::collections::{PgCredentialCollection, PgSessionCollection};
use crate::memory::MemoryCollection;

/// The session and credential collections of one backend.
///
/// Built once at startup and handed to the stores.
#[derive(Debug, Clone)]
pub struct Collections {
    /// Session records.
    pub sessions: Arc<dyn Collection<Session>>,
    /// Credential records.
    pub credentials: Arc<dyn Collection<Credential>>,
    /// The PostgreSQL pool both collections share, when that backend is in use.
    pub pool: Option<PgPool>,
}

impl Collections {
    /// Build the collections selected by `config.backend`.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend.as_str() {
            "postgres" => Self::postgres(config).await,
            "memory" => {
                info!("Initializing in-memory collections");
                Ok(Self::in_memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown database backend: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Connect to PostgreSQL, bring the `sessions` and `credentials` tables
    /// up to date, and wrap them as collections.
    pub async fn postgres(config: &DatabaseConfig) -> AppResult<Self> {
        let options = connect_options(&config.url)?;
        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or_default(),
            max_connections = config.max_connections,
            "Initializing PostgreSQL collections"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to the document store: {e}"),
                    e,
                )
            })?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to create session/credential tables: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            sessions: Arc::new(PgSessionCollection::new(pool.clone())),
            credentials: Arc::new(PgCredentialCollection::new(pool.clone())),
            pool: Some(pool),
        })
    }

    /// Fresh, empty in-process collections.
    pub fn in_memory() -> Self {
        Self {
            sessions: Arc::new(MemoryCollection::<Session>::new("sessions")),
            credentials: Arc::new(MemoryCollection::<Credential>::new("credentials")),
            pool: None,
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("PostgreSQL pool closed");
        }
    }
}

/// Parse `database.url`. A malformed URL is a configuration fault, reported
/// before any connection attempt.
fn connect_options(url: &str) -> AppResult<PgConnectOptions> {
    PgConnectOptions::from_str(url).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            "database.url is not a valid PostgreSQL URL",
            e,
        )
    })
}
