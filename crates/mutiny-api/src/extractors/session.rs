//! `CurrentSession` extractor. Looks up the session named by the `id`
//! cookie, refreshing it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use mutiny_entity::Session;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "id";

/// The caller's session, or `None` when not logged in.
///
/// Extraction never rejects for a missing, malformed, or expired cookie;
/// only storage faults fail the request.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

impl CurrentSession {
    /// Username of the logged-in user.
    pub fn username(&self) -> Option<&str> {
        self.0.as_ref().map(|s| s.data.username.as_str())
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let raw_id = jar.get(SESSION_COOKIE).map(|cookie| cookie.value());

        let session = state.sessions.get_session(raw_id).await?;
        Ok(Self(session))
    }
}
