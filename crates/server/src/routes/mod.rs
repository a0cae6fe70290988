//! HTTP route handlers for the catalog server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health           - Liveness check
//!
//! # Auth
//! POST   /auth/signup      - Register, returns a bearer token (201)
//! POST   /auth/signin      - Authenticate, returns a bearer token (200)
//!
//! # Users (require auth)
//! GET    /users/current    - The authenticated user
//! PATCH  /users            - Edit the authenticated user's profile
//!
//! # Movies (require auth, always scoped to the caller)
//! GET    /movies           - List own movies
//! POST   /movies           - Create a movie (201)
//! GET    /movies/{id}      - Fetch an owned movie
//! PUT    /movies/{id}      - Replace an owned movie's fields
//! DELETE /movies/{id}      - Delete an owned movie (204)
//! ```

pub mod auth;
pub mod movies;
pub mod users;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::sign_up))
        .route("/signin", post(auth::sign_in))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(users::current))
        .route("/", patch(users::edit))
}

/// Create the movie routes router.
pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list).post(movies::create))
        .route(
            "/{id}",
            get(movies::show).put(movies::update).delete(movies::remove),
        )
}

/// Create the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/movies", movie_routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
