//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default, so an empty configuration
//! is a valid one.

pub mod app;
pub mod auth;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::{AuthConfig, BootstrapAdminConfig};
pub use self::logging::LoggingConfig;
pub use self::session::{MAX_TIMEOUT_MINUTES, SessionConfig};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence backend settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Credential hashing and bootstrap settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session expiry settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Persistence backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Backend name: `"postgres"` or `"memory"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// PostgreSQL connection URL (ignored by the memory backend).
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: default_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

/// Backends understood by [`DatabaseConfig::backend`].
pub const SUPPORTED_BACKENDS: &[&str] = &["postgres", "memory"];

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the file at `path`, an environment-specific overlay
    /// (`config/{env}`), and environment variables prefixed with `MUTINY__`
    /// (for example `MUTINY__SESSION__TIMEOUT_MINUTES=1`). Missing files are
    /// skipped.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MUTINY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values the stores cannot operate with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.session.timeout_minutes == 0 {
            return Err(AppError::configuration(
                "session.timeout_minutes must be greater than zero",
            ));
        }
        if self.session.timeout_minutes > MAX_TIMEOUT_MINUTES {
            return Err(AppError::configuration(format!(
                "session.timeout_minutes must be at most {MAX_TIMEOUT_MINUTES}"
            )));
        }
        if self.auth.hash_iterations == 0 {
            return Err(AppError::configuration(
                "auth.hash_iterations must be greater than zero",
            ));
        }
        if !SUPPORTED_BACKENDS.contains(&self.database.backend.as_str()) {
            return Err(AppError::configuration(format!(
                "Unknown database backend: '{}'. Supported: {}",
                self.database.backend,
                SUPPORTED_BACKENDS.join(", ")
            )));
        }
        Ok(())
    }
}

fn default_backend() -> String {
    "memory".to_string()
}

fn default_url() -> String {
    "postgres://localhost:5432/mutiny".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}
