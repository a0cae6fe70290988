//! In-memory store implementations.
//!
//! Used by the integration tests and for running the server without a
//! database. Rows live in a `Mutex<HashMap>`; IDs are assigned from a
//! per-store counter, matching the serial columns of the Postgres schema.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use reelvault_core::{Email, MovieId, UserId};

use super::{MovieStore, StoreError, UserStore};
use crate::models::{Movie, MovieDraft, User, UserChanges};

/// User store holding rows in process memory.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<UserTable>,
}

#[derive(Default)]
struct UserTable {
    rows: HashMap<i32, StoredUser>,
    next_id: i32,
}

#[derive(Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().map_or(0, |t| t.rows.len())
    }

    /// Whether the store holds no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove a user row, returning whether it existed.
    ///
    /// The HTTP surface never deletes users; this exists so tests can
    /// exercise tokens that outlive their credential.
    pub fn remove(&self, id: UserId) -> bool {
        self.inner
            .lock()
            .map_or(false, |mut t| t.rows.remove(&id.as_i32()).is_some())
    }

    fn table(&self) -> Result<MutexGuard<'_, UserTable>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::DataCorruption("user store mutex poisoned".to_owned()))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, email: &Email, password_hash: &str) -> Result<User, StoreError> {
        let mut table = self.table()?;

        if table.rows.values().any(|r| r.user.email == *email) {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }

        table.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: UserId::new(table.next_id),
            email: email.clone(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };

        table.rows.insert(
            user.id.as_i32(),
            StoredUser {
                user: user.clone(),
                password_hash: password_hash.to_owned(),
            },
        );

        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<(User, String)>, StoreError> {
        let table = self.table()?;
        Ok(table
            .rows
            .values()
            .find(|r| r.user.email == *email)
            .map(|r| (r.user.clone(), r.password_hash.clone())))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let table = self.table()?;
        Ok(table.rows.get(&id.as_i32()).map(|r| r.user.clone()))
    }

    async fn update(&self, id: UserId, changes: &UserChanges) -> Result<User, StoreError> {
        let mut table = self.table()?;

        if let Some(new_email) = &changes.email
            && table
                .rows
                .values()
                .any(|r| r.user.id != id && r.user.email == *new_email)
        {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }

        let row = table.rows.get_mut(&id.as_i32()).ok_or(StoreError::NotFound)?;

        if let Some(email) = &changes.email {
            row.user.email = email.clone();
        }
        if let Some(first_name) = &changes.first_name {
            row.user.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &changes.last_name {
            row.user.last_name = Some(last_name.clone());
        }
        row.user.updated_at = Utc::now();

        Ok(row.user.clone())
    }
}

/// Movie store holding rows in process memory.
#[derive(Default)]
pub struct MemoryMovieStore {
    inner: Mutex<MovieTable>,
}

#[derive(Default)]
struct MovieTable {
    rows: HashMap<i32, Movie>,
    next_id: i32,
}

impl MemoryMovieStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored movies, across all owners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().map_or(0, |t| t.rows.len())
    }

    /// Whether the store holds no movies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self) -> Result<MutexGuard<'_, MovieTable>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::DataCorruption("movie store mutex poisoned".to_owned()))
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Movie>, StoreError> {
        let table = self.table()?;
        let mut movies: Vec<Movie> = table
            .rows
            .values()
            .filter(|m| m.owner_id == owner_id)
            .cloned()
            .collect();
        movies.sort_by_key(|m| m.id.as_i32());
        Ok(movies)
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, StoreError> {
        let table = self.table()?;
        Ok(table.rows.get(&id.as_i32()).cloned())
    }

    async fn create(&self, owner_id: UserId, draft: &MovieDraft) -> Result<Movie, StoreError> {
        let mut table = self.table()?;

        table.next_id += 1;
        let now = Utc::now();
        let movie = Movie {
            id: MovieId::new(table.next_id),
            owner_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            created_at: now,
            updated_at: now,
        };

        table.rows.insert(movie.id.as_i32(), movie.clone());
        Ok(movie)
    }

    async fn update(&self, id: MovieId, draft: &MovieDraft) -> Result<Movie, StoreError> {
        let mut table = self.table()?;
        let movie = table.rows.get_mut(&id.as_i32()).ok_or(StoreError::NotFound)?;

        movie.title = draft.title.clone();
        movie.description = draft.description.clone();
        movie.updated_at = Utc::now();

        Ok(movie.clone())
    }

    async fn delete(&self, id: MovieId) -> Result<(), StoreError> {
        let mut table = self.table()?;
        if table.rows.remove(&id.as_i32()).is_none() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
