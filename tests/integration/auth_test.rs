//! Integration tests for registration, login and logout.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("testuser", "password123", &[]).await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(&[("username", "testuser"), ("password", "password123")]),
            None,
        )
        .await;

    assert!(response.status.is_redirection());
    assert_eq!(response.location(), Some("/"));

    let raw = response.raw_session_cookie().expect("No id cookie");
    assert!(raw.contains("HttpOnly"));
    assert!(raw.contains("Path=/"));

    let cookie = response.session_cookie().unwrap();
    assert_eq!(cookie.len(), 32);
    assert!(cookie.chars().all(|c| c.is_ascii_hexdigit()));

    let home = app.home(Some(&cookie)).await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains(r#"<a href="/logout">Log Out</a>"#));
    assert_eq!(home.session_json()["data"]["username"], "testuser");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("testuser2", "password123", &[]).await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(&[("username", "testuser2"), ("password", "wrongpassword")]),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.session_cookie().is_none());
    assert_eq!(app.sessions.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(&[("username", "nobody"), ("password", "password123")]),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("partial", "pw", &[]).await;

    let response = app
        .request("POST", "/login", Some(&[("username", "partial")]), None)
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_logs_in() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/register",
            Some(&[("username", "newbie"), ("password", "pw")]),
            None,
        )
        .await;

    assert!(response.status.is_redirection());
    let cookie = response.session_cookie().expect("No id cookie");

    let home = app.home(Some(&cookie)).await;
    assert_eq!(home.session_json()["data"]["username"], "newbie");
    assert!(app.auth.log_in("newbie", "pw").await.unwrap());
    assert!(app.auth.get_acls("newbie").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_duplicate_forbidden() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("taken", "original", &[]).await;

    let response = app
        .request(
            "POST",
            "/register",
            Some(&[("username", "taken"), ("password", "other")]),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.session_cookie().is_none());
    assert!(app.auth.log_in("taken", "original").await.unwrap());
    assert!(!app.auth.log_in("taken", "other").await.unwrap());
}

#[tokio::test]
async fn test_register_empty_password_forbidden() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/register",
            Some(&[("username", "blank"), ("password", "")]),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.auth.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("leaver", "pw", &[]).await;
    let cookie = app.login("leaver", "pw").await;

    let response = app.request("POST", "/logout", None, Some(&cookie)).await;
    assert!(response.status.is_redirection());
    assert_eq!(response.location(), Some("/"));
    assert_eq!(response.session_cookie().as_deref(), Some(""));

    let home = app.home(Some(&cookie)).await;
    assert!(home.session_json().is_null());
    assert_eq!(app.sessions.count().await.unwrap(), 0);

    // Credentials survive logout.
    assert!(app.auth.log_in("leaver", "pw").await.unwrap());
}

#[tokio::test]
async fn test_logout_via_get_leaves_other_sessions() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("multi", "pw", &[]).await;
    let first = app.login("multi", "pw").await;
    let second = app.login("multi", "pw").await;
    assert_ne!(first, second);

    app.request("GET", "/logout", None, Some(&first)).await;

    assert!(app.home(Some(&first)).await.session_json().is_null());
    assert_eq!(
        app.home(Some(&second)).await.session_json()["data"]["username"],
        "multi"
    );
}
