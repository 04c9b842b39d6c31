//! Session entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::id::SessionId;

/// Payload attached to a session when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// The authenticated user.
    pub username: String,
}

impl SessionData {
    /// Session payload for `username`.
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// A server-held login session.
///
/// Sessions are created on login, refreshed by every successful lookup,
/// and destroyed on logout, expiry, or a bulk reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: SessionId,
    /// When the session was created or last refreshed.
    pub refreshed_at: DateTime<Utc>,
    /// Payload set at creation.
    pub data: SessionData,
}

impl Session {
    /// A new session stamped at `now`.
    pub fn new(id: SessionId, data: SessionData, now: DateTime<Utc>) -> Self {
        Self {
            id,
            refreshed_at: now,
            data,
        }
    }

    /// Time elapsed since the last refresh.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.refreshed_at
    }

    /// A session is valid while its age is strictly below `timeout`.
    pub fn is_fresh(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        self.age(now) < timeout
    }
}
