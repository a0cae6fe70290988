//! Guard behavior and user profile endpoints.

use axum::http::StatusCode;
use serde_json::{Value, json};

use reelvault_integration_tests::test_app;

#[tokio::test]
async fn test_current_user_requires_token() {
    let app = test_app();

    let (status, _) = app.request("GET", "/users/current", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = test_app();
    app.sign_up("test@test.com", "supersecurepwd").await;

    let (status, _) = app
        .request("GET", "/users/current", Some("invalid.token.here"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected() {
    let app = test_app();
    let token = app.sign_up("test@test.com", "supersecurepwd").await;

    // Raw header without the Bearer prefix.
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/users/current")
        .header(axum::http::header::AUTHORIZATION, token)
        .body(axum::body::Body::empty())
        .expect("failed to build request");

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .expect("router error");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_has_no_hash_field() {
    let app = test_app();
    let token = app.sign_up("test@test.com", "supersecurepwd").await;

    let (status, body) = app
        .request("GET", "/users/current", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "test@test.com");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
    assert!(body.get("hash").is_none());
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let app = test_app();
    let token = app.sign_up("test@test.com", "supersecurepwd").await;

    let principal = app.tokens.validate(&token).expect("token should validate");
    assert!(app.users.remove(principal.id));

    let (status, _) = app
        .request("GET", "/users/current", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_edit_profile_updates_and_echoes_fields() {
    let app = test_app();
    let token = app.sign_up("test@test.com", "supersecurepwd").await;

    let (status, body) = app
        .request(
            "PATCH",
            "/users",
            Some(&token),
            Some(json!({ "first_name": "Tester", "email": "tester@test.com" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Tester");
    assert_eq!(body["email"], "tester@test.com");
    assert_eq!(body["last_name"], Value::Null);

    // The new email is the credential now.
    let (status, _) = app
        .request(
            "POST",
            "/auth/signin",
            None,
            Some(json!({ "email": "tester@test.com", "password": "supersecurepwd" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_edit_profile_cannot_take_anothers_email() {
    let app = test_app();
    app.sign_up("first@test.com", "supersecurepwd").await;
    let token = app.sign_up("second@test.com", "supersecurepwd").await;

    let (status, _) = app
        .request(
            "PATCH",
            "/users",
            Some(&token),
            Some(json!({ "email": "first@test.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
