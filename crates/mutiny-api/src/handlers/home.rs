//! Home page.

use axum::response::Html;

use crate::error::ApiError;
use crate::extractors::CurrentSession;
use crate::pages;

/// GET /
pub async fn home(session: CurrentSession) -> Result<Html<String>, ApiError> {
    Ok(Html(pages::home(session.0.as_ref())?))
}
