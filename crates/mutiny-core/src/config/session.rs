//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Longest accepted inactivity window: ten years.
pub const MAX_TIMEOUT_MINUTES: u64 = 60 * 24 * 366 * 10;

/// Session expiry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Inactivity window in minutes. Every successful lookup restarts it.
    #[serde(default = "default_timeout")]
    pub timeout_minutes: u64,
    /// Interval of the background orphan sweep in seconds (`0` disables it;
    /// lookups still sweep).
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: default_timeout(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

impl SessionConfig {
    /// The inactivity window as a chrono duration.
    ///
    /// Values above [`MAX_TIMEOUT_MINUTES`] are clamped to it.
    pub fn timeout(&self) -> chrono::Duration {
        let minutes = self.timeout_minutes.min(MAX_TIMEOUT_MINUTES);
        chrono::Duration::minutes(minutes as i64)
    }
}

fn default_timeout() -> u64 {
    5
}

fn default_cleanup_interval() -> u64 {
    60
}
