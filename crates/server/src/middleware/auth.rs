//! Authentication extractor.
//!
//! Provides the [`CurrentUser`] extractor that protected route handlers take
//! as an argument; a handler with a `CurrentUser` parameter can only run for
//! an authenticated request.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Pulls the token from the `Authorization` header, validates it, and then
/// re-resolves the user from the store rather than trusting the token
/// payload alone; a token whose user was deleted after issuance no longer
/// authenticates. Every failure mode rejects with 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthenticated)?;

        let principal = state.tokens().validate(token).map_err(|_| {
            tracing::debug!("rejected request with invalid bearer token");
            AppError::Unauthenticated
        })?;

        let user = state
            .users()
            .find_by_id(principal.id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = %principal.id, "token references a deleted user");
                AppError::Unauthenticated
            })?;

        Ok(Self(user))
    }
}
