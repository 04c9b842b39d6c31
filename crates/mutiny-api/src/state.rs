//! Application state shared across all handlers.

use std::sync::Arc;

use mutiny_auth::{AuthStore, SessionStore};

/// Application state containing the two stores.
///
/// Constructed once at startup and passed to every handler via
/// `State<AppState>`. All fields are `Arc`-wrapped for cheap cloning.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session lifecycle store.
    pub sessions: Arc<SessionStore>,
    /// Credential store.
    pub auth: Arc<AuthStore>,
}

impl AppState {
    /// Bundle the stores.
    pub fn new(sessions: Arc<SessionStore>, auth: Arc<AuthStore>) -> Self {
        Self { sessions, auth }
    }
}
