//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::services::AuthService;
use crate::state::AppState;

/// Sign-up / sign-in request body.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

/// Token response body.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// `POST /auth/signup`
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<AuthRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let auth = AuthService::new(state.users(), state.tokens());
    let access_token = auth.sign_up(&req.email, &req.password).await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { access_token })))
}

/// `POST /auth/signin`
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<AuthRequest>,
) -> Result<Json<TokenResponse>> {
    let auth = AuthService::new(state.users(), state.tokens());
    let access_token = auth.sign_in(&req.email, &req.password).await?;

    Ok(Json(TokenResponse { access_token }))
}
