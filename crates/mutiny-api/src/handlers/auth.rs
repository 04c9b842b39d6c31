//! Auth handlers: login, registration, logout.

use axum::extract::{Form, State};
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::info;

use mutiny_core::error::AppError;
use mutiny_entity::{SessionData, SessionId};

use crate::dto::CredentialsForm;
use crate::error::ApiError;
use crate::extractors::{CurrentSession, SESSION_COOKIE};
use crate::pages;
use crate::state::AppState;

fn session_cookie(id: SessionId) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .http_only(true)
        .path("/")
        .build()
}

/// Verifies the form, opens a session, and stores its id in the jar.
async fn begin_session(
    state: &AppState,
    jar: CookieJar,
    form: &CredentialsForm,
) -> Result<CookieJar, ApiError> {
    if !state.auth.log_in(&form.username, &form.password).await? {
        return Err(AppError::authorization("Invalid username or password").into());
    }

    let id = state
        .sessions
        .new_session(SessionData::for_user(&form.username))
        .await?;
    info!(username = %form.username, "User logged in");

    Ok(jar.add(session_cookie(id)))
}

/// GET /login
pub async fn login_form() -> Result<Html<String>, ApiError> {
    Ok(Html(pages::login()?))
}

/// GET /register
pub async fn register_form() -> Result<Html<String>, ApiError> {
    Ok(Html(pages::register()?))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let jar = begin_session(&state, jar, &form).await?;
    Ok((jar, Redirect::to("/")))
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    if !state
        .auth
        .register(&form.username, &form.password, &[])
        .await?
    {
        return Err(AppError::authorization("Registration failed").into());
    }
    info!(username = %form.username, "User registered");

    let jar = begin_session(&state, jar, &form).await?;
    Ok((jar, Redirect::to("/")))
}

/// GET|POST /logout
pub async fn logout(
    State(state): State<AppState>,
    session: CurrentSession,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    let raw_id = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string());
    state.sessions.clear_session(raw_id.as_deref()).await?;

    if let Some(username) = session.username() {
        state.auth.log_out(username).await;
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, Redirect::to("/")))
}
