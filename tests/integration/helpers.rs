//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use mutiny_api::{AppState, build_router};
use mutiny_auth::{AuthStore, PasswordHasher, SessionStore};
use mutiny_core::config::{AuthConfig, SessionConfig};
use mutiny_core::traits::ManualClock;
use mutiny_database::Collections;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Session store shared with the router
    pub sessions: Arc<SessionStore>,
    /// Credential store shared with the router
    pub auth: Arc<AuthStore>,
    /// Clock driving session expiry
    pub clock: Arc<ManualClock>,
}

/// Captured response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of the `id` cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|v| v.strip_prefix("id="))
            .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
    }

    /// Raw `Set-Cookie` header for the `id` cookie.
    pub fn raw_session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("id="))
            .map(str::to_string)
    }

    /// Redirect target, if any.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The session JSON printed inside the home page's `<pre>` block.
    pub fn session_json(&self) -> Value {
        let start = self.body.find("<pre>\n").expect("No <pre> block") + "<pre>\n".len();
        let end = self.body.find("\n</pre>").expect("No </pre>");
        let text = self.body[start..end]
            .replace("&quot;", "\"")
            .replace("&#34;", "\"")
            .replace("&#39;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&");
        serde_json::from_str(&text).expect("Session block is not JSON")
    }
}

impl TestApp {
    /// Create a new test application on the in-memory backend
    pub async fn new() -> Self {
        Self::with_timeout(5).await
    }

    /// Create a test application with the given session timeout
    pub async fn with_timeout(timeout_minutes: u64) -> Self {
        let collections = Collections::in_memory();
        let clock = Arc::new(ManualClock::default());

        let hasher = PasswordHasher::new(&AuthConfig {
            hash_iterations: 1,
            hash_memory_kib: 256,
            ..AuthConfig::default()
        })
        .expect("Failed to build hasher");

        let session_config = SessionConfig {
            timeout_minutes,
            ..SessionConfig::default()
        };

        let sessions = Arc::new(SessionStore::with_clock(
            collections.sessions.clone(),
            &session_config,
            clock.clone(),
        ));
        let auth = Arc::new(AuthStore::new(collections.credentials.clone(), hasher));

        let router = build_router(AppState::new(Arc::clone(&sessions), Arc::clone(&auth)));

        Self {
            router,
            sessions,
            auth,
            clock,
        }
    }

    /// Create a test user directly through the store
    pub async fn create_test_user(&self, username: &str, password: &str, acls: &[&str]) {
        assert!(
            self.auth
                .register(username, password, acls)
                .await
                .expect("Failed to register"),
            "Username already taken: {username}"
        );
    }

    /// Log in over HTTP and return the session cookie value
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/login",
                Some(&[("username", username), ("password", password)]),
                None,
            )
            .await;
        assert!(
            response.status.is_redirection(),
            "Login failed: {}",
            response.status
        );
        response
            .session_cookie()
            .expect("No id cookie in login response")
    }

    /// Fetch the home page
    pub async fn home(&self, cookie: Option<&str>) -> TestResponse {
        self.request("GET", "/", None, cookie).await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        form: Option<&[(&str, &str)]>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body = form
            .map(|fields| {
                fields
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join("&")
            })
            .unwrap_or_default();

        let mut req = Request::builder().method(method).uri(path);
        if form.is_some() {
            req = req.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        }
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, format!("id={cookie}"));
        }
        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
