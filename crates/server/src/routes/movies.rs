//! Movie route handlers.
//!
//! Every handler takes [`CurrentUser`]; the service layer scopes each
//! operation to that user.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use reelvault_core::MovieId;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::{Movie, MovieDraft};
use crate::services::MovieService;
use crate::state::AppState;

/// Create / replace request body.
#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    pub title: String,
    pub description: String,
}

impl From<MovieRequest> for MovieDraft {
    fn from(req: MovieRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
        }
    }
}

/// `GET /movies`
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Movie>>> {
    let movies = MovieService::new(state.movies());
    Ok(Json(movies.list(user.id).await?))
}

/// `GET /movies/{id}`
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<MovieId>,
) -> Result<Json<Movie>> {
    let movies = MovieService::new(state.movies());
    Ok(Json(movies.get(user.id, id).await?))
}

/// `POST /movies`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<MovieRequest>,
) -> Result<(StatusCode, Json<Movie>)> {
    let movies = MovieService::new(state.movies());
    let movie = movies.create(user.id, req.into()).await?;

    Ok((StatusCode::CREATED, Json(movie)))
}

/// `PUT /movies/{id}`
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<MovieId>,
    Json(req): Json<MovieRequest>,
) -> Result<Json<Movie>> {
    let movies = MovieService::new(state.movies());
    Ok(Json(movies.update(user.id, id, req.into()).await?))
}

/// `DELETE /movies/{id}`
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<MovieId>,
) -> Result<StatusCode> {
    let movies = MovieService::new(state.movies());
    movies.delete(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
