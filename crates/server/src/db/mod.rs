//! Persistence layer: store traits and their implementations.
//!
//! The rest of the crate only sees the [`UserStore`] and [`MovieStore`]
//! traits; services and handlers never issue SQL themselves. Two
//! implementations exist:
//!
//! - [`postgres`] - production stores over a `PgPool`
//! - [`memory`] - in-process stores for tests and local runs
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and are applied on server
//! startup via `sqlx::migrate!`.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use reelvault_core::{Email, MovieId, UserId};

use crate::models::{Movie, MovieDraft, User, UserChanges};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Store of user credentials and profiles.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a new user with email and password hash.
    ///
    /// Returns `StoreError::Conflict` if the email already exists.
    async fn create(&self, email: &Email, password_hash: &str) -> Result<User, StoreError>;

    /// Find a user and their password hash by email.
    ///
    /// The hash is returned separately so that it never travels with the
    /// public [`User`] shape.
    async fn find_by_email(&self, email: &Email) -> Result<Option<(User, String)>, StoreError>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Apply profile edits to a user row.
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist and
    /// `StoreError::Conflict` if an email change collides with another user.
    async fn update(&self, id: UserId, changes: &UserChanges) -> Result<User, StoreError>;
}

/// Store of movie catalog entries.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// List all movies owned by the given user, oldest first.
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Movie>, StoreError>;

    /// Find a movie by ID, regardless of owner.
    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, StoreError>;

    /// Create a movie owned by the given user.
    async fn create(&self, owner_id: UserId, draft: &MovieDraft) -> Result<Movie, StoreError>;

    /// Replace the caller-editable fields of a movie.
    ///
    /// Returns `StoreError::NotFound` if the movie doesn't exist.
    async fn update(&self, id: MovieId, draft: &MovieDraft) -> Result<Movie, StoreError>;

    /// Delete a movie.
    ///
    /// Returns `StoreError::NotFound` if the movie doesn't exist.
    async fn delete(&self, id: MovieId) -> Result<(), StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
