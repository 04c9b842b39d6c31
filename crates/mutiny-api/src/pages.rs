//! Server-rendered pages.

use askama::Template;

use mutiny_core::error::AppError;
use mutiny_entity::Session;

/// Username/password form shared by login and registration.
#[derive(Template)]
#[template(path = "credentials.html")]
pub struct CredentialsTemplate {
    pub title: &'static str,
    pub action: &'static str,
}

/// Home page: navigation links plus the current session as JSON.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub logged_in: bool,
    pub session_json: String,
}

impl HomeTemplate {
    /// Dump `session` (or `null`) as pretty JSON.
    pub fn new(session: Option<&Session>) -> Result<Self, AppError> {
        Ok(Self {
            logged_in: session.is_some(),
            session_json: serde_json::to_string_pretty(&session)?,
        })
    }
}

fn render(template: &impl Template) -> Result<String, AppError> {
    template
        .render()
        .map_err(|e| AppError::internal(format!("Template rendering failed: {e}")))
}

/// Login form.
pub fn login() -> Result<String, AppError> {
    render(&CredentialsTemplate {
        title: "Log In",
        action: "/login",
    })
}

/// Registration form.
pub fn register() -> Result<String, AppError> {
    render(&CredentialsTemplate {
        title: "Register",
        action: "/register",
    })
}

/// Home page for `session`.
pub fn home(session: Option<&Session>) -> Result<String, AppError> {
    render(&HomeTemplate::new(session)?)
}
