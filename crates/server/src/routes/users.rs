//! User route handlers.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::services::{ProfileUpdate, UserService};
use crate::state::AppState;

/// `GET /users/current`
///
/// The guard already resolved the user; echo it back. The [`User`] shape has
/// no hash field to leak.
pub async fn current(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// `PATCH /users`
pub async fn edit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<User>> {
    let users = UserService::new(state.users());
    let updated = users.edit_profile(user.id, update).await?;

    Ok(Json(updated))
}
