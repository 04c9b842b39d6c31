//! Integration tests for cookie sessions and sliding expiry.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;

use mutiny_entity::SessionData;

#[tokio::test]
async fn test_anonymous_home() {
    let app = helpers::TestApp::new().await;

    let response = app.home(None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"<a href="/register">Register</a>"#));
    assert!(response.body.contains(r#"<a href="/login">Log In</a>"#));
    assert!(response.session_json().is_null());
}

#[tokio::test]
async fn test_garbage_cookie_is_anonymous() {
    let app = helpers::TestApp::new().await;

    for cookie in ["", "not-a-uuid", "00000000000000000000000000000000"] {
        let response = app.home(Some(cookie)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.session_json().is_null());
    }
}

#[tokio::test]
async fn test_session_expires_without_activity() {
    let app = helpers::TestApp::with_timeout(1).await;
    app.create_test_user("idle", "pw", &[]).await;
    let cookie = app.login("idle", "pw").await;

    app.clock.advance(Duration::seconds(61));

    let response = app.home(Some(&cookie)).await;
    assert!(response.session_json().is_null());
    assert!(response.body.contains("/login"));
    assert_eq!(app.sessions.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_activity_keeps_session_alive() {
    let app = helpers::TestApp::with_timeout(1).await;
    app.create_test_user("busy", "pw", &[]).await;
    let cookie = app.login("busy", "pw").await;

    for _ in 0..4 {
        app.clock.advance(Duration::seconds(45));
        let response = app.home(Some(&cookie)).await;
        assert_eq!(response.session_json()["data"]["username"], "busy");
    }
}

#[tokio::test]
async fn test_home_reports_refresh_time() {
    let app = helpers::TestApp::with_timeout(1).await;
    app.create_test_user("timer", "pw", &[]).await;
    let cookie = app.login("timer", "pw").await;

    app.clock.advance(Duration::seconds(30));
    let first = app.home(Some(&cookie)).await.session_json();
    app.clock.advance(Duration::seconds(30));
    let second = app.home(Some(&cookie)).await.session_json();

    assert_eq!(first["id"], second["id"]);
    assert_ne!(first["refreshed_at"], second["refreshed_at"]);
}

#[tokio::test]
async fn test_requests_sweep_orphans() {
    let app = helpers::TestApp::with_timeout(1).await;
    for name in ["a", "b", "c"] {
        app.sessions
            .new_session(SessionData::for_user(name))
            .await
            .unwrap();
    }
    assert_eq!(app.sessions.count().await.unwrap(), 3);

    app.clock.advance(Duration::minutes(2));
    app.home(None).await;

    assert_eq!(app.sessions.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_forms_render() {
    let app = helpers::TestApp::new().await;

    let login = app.request("GET", "/login", None, None).await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.body.contains("<legend>Log In</legend>"));

    let register = app.request("GET", "/register", None, None).await;
    assert_eq!(register.status, StatusCode::OK);
    assert!(register.body.contains("<legend>Register</legend>"));
}
