//! Periodic orphan sweep.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use mutiny_core::error::AppError;

use super::store::SessionStore;

/// Runs [`SessionStore::sweep_orphans`] on a fixed interval.
///
/// Lookups already sweep; this bounds storage growth while no requests
/// arrive.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    /// Session store to sweep.
    session_store: Arc<SessionStore>,
    /// Time between sweeps.
    interval: Duration,
}

impl SessionCleanup {
    /// Creates a new session cleanup handler.
    pub fn new(session_store: Arc<SessionStore>, interval: Duration) -> Self {
        Self {
            session_store,
            interval,
        }
    }

    /// Runs one cleanup cycle. Returns the number of sessions removed.
    pub async fn run_cleanup(&self) -> Result<u64, AppError> {
        let removed = self.session_store.sweep_orphans().await?;
        if removed > 0 {
            info!(removed, "Session cleanup completed");
        }
        Ok(removed)
    }

    /// Spawns the sweep loop. It exits once `shutdown` becomes `true` or its
    /// sender is dropped.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; startup already reset
            // the collection.
            ticker.tick().await;

            info!(
                interval_seconds = self.interval.as_secs(),
                "Session cleanup task started"
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_cleanup().await {
                            error!(error = %e, "Session cleanup failed");
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Session cleanup task stopped");
        })
    }
}
