//! Integration test harness for Reelvault.
//!
//! Builds the real application router over the in-memory stores so tests
//! run hermetically, with no database or listening socket. Requests are
//! driven through `tower::ServiceExt::oneshot`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p reelvault-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use reelvault_server::db::memory::{MemoryMovieStore, MemoryUserStore};
use reelvault_server::routes;
use reelvault_server::services::TokenService;
use reelvault_server::state::AppState;

/// Signing secret used by every test app.
pub const TEST_JWT_SECRET: &str = "0W8DyKOdmRT3BopGpUwkZabAE7XIvVqz";

/// A fully wired application over in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub tokens: TokenService,
    pub users: Arc<MemoryUserStore>,
    pub movies: Arc<MemoryMovieStore>,
}

/// Build a fresh application for one test.
#[must_use]
pub fn test_app() -> TestApp {
    let users = Arc::new(MemoryUserStore::new());
    let movies = Arc::new(MemoryMovieStore::new());
    let tokens = TokenService::new(&SecretString::from(TEST_JWT_SECRET));
    let state = AppState::new(users.clone(), movies.clone(), tokens.clone());

    TestApp {
        router: routes::router(state),
        tokens,
        users,
        movies,
    }
}

impl TestApp {
    /// Send one request and return the status plus the JSON body (or `Null`
    /// for empty/non-JSON bodies).
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router error");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    /// Sign up a user and return their bearer token.
    pub async fn sign_up(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/auth/signup",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "sign-up failed: {body}");
        access_token(&body)
    }
}

/// Pull the access token out of an auth response body.
#[must_use]
pub fn access_token(body: &Value) -> String {
    body.get("access_token")
        .and_then(Value::as_str)
        .expect("response has no access_token")
        .to_owned()
}
