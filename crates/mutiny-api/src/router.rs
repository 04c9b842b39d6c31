//! Route definitions.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home::home))
        .route(
            "/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route(
            "/register",
            get(handlers::auth::register_form).post(handlers::auth::register),
        )
        .route(
            "/logout",
            get(handlers::auth::logout).post(handlers::auth::logout),
        )
        .layer(axum::middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use mutiny_auth::{AuthStore, PasswordHasher, SessionStore};
    use mutiny_core::config::{AuthConfig, SessionConfig};
    use mutiny_database::Collections;

    use super::*;

    fn app() -> Router {
        let collections = Collections::in_memory();
        let hasher = PasswordHasher::new(&AuthConfig {
            hash_iterations: 1,
            hash_memory_kib: 256,
            ..AuthConfig::default()
        })
        .unwrap();
        let state = AppState::new(
            Arc::new(SessionStore::new(
                collections.sessions.clone(),
                &SessionConfig::default(),
            )),
            Arc::new(AuthStore::new(collections.credentials.clone(), hasher)),
        );
        build_router(state)
    }

    #[tokio::test]
    async fn test_forms_are_served() {
        for path in ["/login", "/register"] {
            let response = app()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_unknown_login_is_forbidden() {
        let response = app()
            .oneshot(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("username=ghost&password=x"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_anonymous_logout_redirects_home() {
        let response = app()
            .oneshot(Request::get("/logout").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], "/");
    }
}
