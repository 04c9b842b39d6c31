//! Session storage with sliding expiry.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use mutiny_core::config::SessionConfig;
use mutiny_core::error::AppError;
use mutiny_core::traits::{Clock, Collection, SystemClock};
use mutiny_entity::{Session, SessionData, SessionFilter, SessionId, SessionPatch};

/// Owns the session collection.
///
/// A session stays valid while `now - refreshed_at < timeout`. Every
/// successful lookup moves `refreshed_at` to `now`. Stale records are
/// removed eagerly by the orphan sweep that runs before lookups and
/// deletions, and lazily when a lookup finds one.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Session collection.
    sessions: Arc<dyn Collection<Session>>,
    /// Inactivity window.
    timeout: Duration,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Creates a session store reading the system clock.
    pub fn new(sessions: Arc<dyn Collection<Session>>, config: &SessionConfig) -> Self {
        Self::with_clock(sessions, config, Arc::new(SystemClock))
    }

    /// Creates a session store with an explicit time source.
    pub fn with_clock(
        sessions: Arc<dyn Collection<Session>>,
        config: &SessionConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            timeout: config.timeout(),
            clock,
        }
    }

    /// The inactivity window.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Oldest `refreshed_at` that is still valid at `now` is strictly after this.
    fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.timeout
    }

    /// Creates a session carrying `data` and returns its identifier.
    pub async fn new_session(&self, data: SessionData) -> Result<SessionId, AppError> {
        let session = Session::new(SessionId::generate(), data, self.clock.now());
        self.sessions.insert(&session).await?;

        debug!(session_id = %session.id, username = %session.data.username, "New session");
        Ok(session.id)
    }

    /// Looks up a session and extends its life.
    ///
    /// Returns `None` when `id` is missing or unparseable, when no record
    /// exists, or when the record has expired (the expired record is
    /// deleted). The refresh only applies if the record is still fresh at
    /// write time, so a session cannot expire between the check and the
    /// refresh.
    pub async fn get_session(&self, id: Option<&str>) -> Result<Option<Session>, AppError> {
        self.sweep_orphans().await?;

        let Some(raw) = id else {
            return Ok(None);
        };
        let Some(id) = SessionId::parse(raw) else {
            debug!("Unparseable session id");
            return Ok(None);
        };

        let Some(mut session) = self.sessions.find_one(&SessionFilter::Id(id)).await? else {
            debug!(session_id = %id, "No session record found");
            return Ok(None);
        };

        let now = self.clock.now();
        if !session.is_fresh(now, self.timeout) {
            debug!(session_id = %id, "Session expired");
            self.sessions.delete_many(&SessionFilter::Id(id)).await?;
            return Ok(None);
        }

        let guard = SessionFilter::FreshSince {
            id,
            cutoff: self.cutoff(now),
        };
        let refreshed = self
            .sessions
            .update_one(&guard, &SessionPatch::Touch(now))
            .await?;
        if !refreshed {
            // Deleted or swept between the read and the refresh.
            debug!(session_id = %id, "Session vanished before refresh");
            return Ok(None);
        }

        debug!(session_id = %id, "Session refreshed");
        session.refreshed_at = now;
        Ok(Some(session))
    }

    /// Deletes a session. Missing, unparseable, or already-deleted ids are
    /// not an error.
    pub async fn clear_session(&self, id: Option<&str>) -> Result<(), AppError> {
        self.sweep_orphans().await?;

        if let Some(id) = id.and_then(SessionId::parse) {
            let removed = self.sessions.delete_many(&SessionFilter::Id(id)).await?;
            debug!(session_id = %id, removed, "Cleared session");
        }
        Ok(())
    }

    /// Deletes every session. Intended for startup or reset.
    pub async fn clear_all_sessions(&self) -> Result<u64, AppError> {
        let removed = self.sessions.delete_many(&SessionFilter::All).await?;
        debug!(removed, "Cleared all sessions");
        Ok(removed)
    }

    /// Deletes every session whose inactivity window has elapsed.
    pub async fn sweep_orphans(&self) -> Result<u64, AppError> {
        let cutoff = self.cutoff(self.clock.now());
        let removed = self
            .sessions
            .delete_many(&SessionFilter::StaleAsOf(cutoff))
            .await?;
        if removed > 0 {
            debug!(removed, "Swept orphaned sessions");
        }
        Ok(removed)
    }

    /// Number of stored sessions, including any not yet swept.
    pub async fn count(&self) -> Result<u64, AppError> {
        self.sessions.count().await
    }
}
