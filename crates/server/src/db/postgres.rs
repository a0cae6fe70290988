//! `PostgreSQL` store implementations.
//!
//! Queries use the runtime-checked sqlx API so the crate builds without a
//! live database; the schema they target is defined by the migrations in
//! `crates/server/migrations/`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use reelvault_core::{Email, MovieId, UserId};

use super::{MovieStore, StoreError, UserStore};
use crate::models::{Movie, MovieDraft, User, UserChanges};

/// User store backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Movie store backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PgMovieStore {
    pool: PgPool,
}

impl PgMovieStore {
    /// Create a new movie store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: UserId,
    email: Email,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row shape for the sign-in lookup; the only query that reads the hash.
#[derive(FromRow)]
struct CredentialRow {
    id: UserId,
    email: Email,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    password_hash: String,
}

impl CredentialRow {
    fn into_parts(self) -> (User, String) {
        (
            User {
                id: self.id,
                email: self.email,
                first_name: self.first_name,
                last_name: self.last_name,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            self.password_hash,
        )
    }
}

#[derive(FromRow)]
struct MovieRow {
    id: MovieId,
    owner_id: UserId,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Map a unique-constraint violation to `Conflict`, everything else to
/// `Database`.
fn map_insert_error(e: sqlx::Error, conflict: &str) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return StoreError::Conflict(conflict.to_owned());
    }
    StoreError::Database(e)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, email: &Email, password_hash: &str) -> Result<User, StoreError> {
        let row: UserRow = sqlx::query_as(
            r"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, first_name, last_name, created_at, updated_at
            ",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "email already exists"))?;

        Ok(row.into())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<(User, String)>, StoreError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            r"
            SELECT id, email, first_name, last_name, created_at, updated_at, password_hash
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CredentialRow::into_parts))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT id, email, first_name, last_name, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, id: UserId, changes: &UserChanges) -> Result<User, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            UPDATE users
            SET email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                updated_at = now()
            WHERE id = $1
            RETURNING id, email, first_name, last_name, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(changes.email.as_ref())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "email already exists"))?;

        row.map(Into::into).ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Movie>, StoreError> {
        let rows: Vec<MovieRow> = sqlx::query_as(
            r"
            SELECT id, owner_id, title, description, created_at, updated_at
            FROM movies
            WHERE owner_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, StoreError> {
        let row: Option<MovieRow> = sqlx::query_as(
            r"
            SELECT id, owner_id, title, description, created_at, updated_at
            FROM movies
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, owner_id: UserId, draft: &MovieDraft) -> Result<Movie, StoreError> {
        let row: MovieRow = sqlx::query_as(
            r"
            INSERT INTO movies (owner_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, title, description, created_at, updated_at
            ",
        )
        .bind(owner_id)
        .bind(&draft.title)
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: MovieId, draft: &MovieDraft) -> Result<Movie, StoreError> {
        let row: Option<MovieRow> = sqlx::query_as(
            r"
            UPDATE movies
            SET title = $2,
                description = $3,
                updated_at = now()
            WHERE id = $1
            RETURNING id, owner_id, title, description, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.description)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Into::into).ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: MovieId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
