//! Ownership-scoped movie operations.
//!
//! Every operation takes the authenticated user's ID and enforces that only
//! the owner can see or touch an entry. A missing ID and someone else's ID
//! fail the same way: the service does not reveal whether the row exists.

use thiserror::Error;

use reelvault_core::{MovieId, UserId};

use crate::db::{MovieStore, StoreError};
use crate::models::{Movie, MovieDraft};

/// Errors that can occur during movie operations.
#[derive(Debug, Error)]
pub enum MovieError {
    /// The entry does not exist or belongs to another user.
    #[error("access to resources denied")]
    AccessDenied,

    /// Invalid caller-supplied fields.
    #[error("{0}")]
    Validation(String),

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Movie catalog service.
pub struct MovieService<'a> {
    movies: &'a dyn MovieStore,
}

impl<'a> MovieService<'a> {
    /// Create a new movie service.
    #[must_use]
    pub const fn new(movies: &'a dyn MovieStore) -> Self {
        Self { movies }
    }

    /// List the caller's movies.
    ///
    /// # Errors
    ///
    /// Returns `MovieError::Store` if the store fails.
    pub async fn list(&self, owner_id: UserId) -> Result<Vec<Movie>, MovieError> {
        Ok(self.movies.list_by_owner(owner_id).await?)
    }

    /// Fetch a single movie the caller owns.
    ///
    /// # Errors
    ///
    /// Returns `MovieError::AccessDenied` if the entry doesn't exist or is
    /// owned by someone else.
    pub async fn get(&self, owner_id: UserId, id: MovieId) -> Result<Movie, MovieError> {
        match self.movies.find_by_id(id).await? {
            Some(movie) if movie.owner_id == owner_id => Ok(movie),
            _ => Err(MovieError::AccessDenied),
        }
    }

    /// Create a movie owned by the caller.
    ///
    /// The owner is always the authenticated user; nothing in the draft can
    /// assign the entry to someone else.
    ///
    /// # Errors
    ///
    /// Returns `MovieError::Validation` for empty fields.
    pub async fn create(&self, owner_id: UserId, draft: MovieDraft) -> Result<Movie, MovieError> {
        validate_draft(&draft)?;

        let movie = self.movies.create(owner_id, &draft).await?;
        tracing::debug!(movie_id = %movie.id, owner_id = %owner_id, "movie created");
        Ok(movie)
    }

    /// Replace the fields of a movie the caller owns.
    ///
    /// # Errors
    ///
    /// Returns `MovieError::AccessDenied` if the entry doesn't exist or is
    /// owned by someone else.
    pub async fn update(
        &self,
        owner_id: UserId,
        id: MovieId,
        draft: MovieDraft,
    ) -> Result<Movie, MovieError> {
        validate_draft(&draft)?;
        self.get(owner_id, id).await?;

        self.movies.update(id, &draft).await.map_err(|e| match e {
            // Deleted between the ownership check and the write.
            StoreError::NotFound => MovieError::AccessDenied,
            other => other.into(),
        })
    }

    /// Delete a movie the caller owns.
    ///
    /// Deleting a nonexistent or foreign entry is an error, not a no-op.
    ///
    /// # Errors
    ///
    /// Returns `MovieError::AccessDenied` if the entry doesn't exist or is
    /// owned by someone else.
    pub async fn delete(&self, owner_id: UserId, id: MovieId) -> Result<(), MovieError> {
        self.get(owner_id, id).await?;

        self.movies.delete(id).await.map_err(|e| match e {
            StoreError::NotFound => MovieError::AccessDenied,
            other => other.into(),
        })
    }
}

fn validate_draft(draft: &MovieDraft) -> Result<(), MovieError> {
    if draft.title.trim().is_empty() {
        return Err(MovieError::Validation("title cannot be empty".to_owned()));
    }
    if draft.description.trim().is_empty() {
        return Err(MovieError::Validation(
            "description cannot be empty".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryMovieStore;

    const ALICE: UserId = UserId::new(1);
    const BOB: UserId = UserId::new(2);

    fn draft(title: &str) -> MovieDraft {
        MovieDraft {
            title: title.to_owned(),
            description: format!("{title} description"),
        }
    }

    #[tokio::test]
    async fn test_owner_can_round_trip_a_movie() {
        let store = MemoryMovieStore::new();
        let service = MovieService::new(&store);

        let created = service.create(ALICE, draft("First Movie")).await.unwrap();
        assert_eq!(created.owner_id, ALICE);

        let fetched = service.get(ALICE, created.id).await.unwrap();
        assert_eq!(fetched.title, "First Movie");

        let listed = service.list(ALICE).await.unwrap();
        assert_eq!(listed.len(), 1);

        let updated = service
            .update(ALICE, created.id, draft("Inception"))
            .await
            .unwrap();
        assert_eq!(updated.title, "Inception");

        service.delete(ALICE, created.id).await.unwrap();
        assert!(service.list(ALICE).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stranger_is_denied_on_every_operation() {
        let store = MemoryMovieStore::new();
        let service = MovieService::new(&store);

        let movie = service.create(ALICE, draft("First Movie")).await.unwrap();

        assert!(matches!(
            service.get(BOB, movie.id).await.unwrap_err(),
            MovieError::AccessDenied
        ));
        assert!(matches!(
            service.update(BOB, movie.id, draft("Stolen")).await.unwrap_err(),
            MovieError::AccessDenied
        ));
        assert!(matches!(
            service.delete(BOB, movie.id).await.unwrap_err(),
            MovieError::AccessDenied
        ));

        // Still there, untouched.
        let survivor = service.get(ALICE, movie.id).await.unwrap();
        assert_eq!(survivor.title, "First Movie");
    }

    #[tokio::test]
    async fn test_missing_id_is_denied_not_missing() {
        let store = MemoryMovieStore::new();
        let service = MovieService::new(&store);

        assert!(matches!(
            service.get(ALICE, MovieId::new(42)).await.unwrap_err(),
            MovieError::AccessDenied
        ));
        assert!(matches!(
            service.delete(ALICE, MovieId::new(42)).await.unwrap_err(),
            MovieError::AccessDenied
        ));
    }

    #[tokio::test]
    async fn test_list_only_shows_own_movies() {
        let store = MemoryMovieStore::new();
        let service = MovieService::new(&store);

        service.create(ALICE, draft("Hers")).await.unwrap();
        service.create(BOB, draft("His")).await.unwrap();

        let titles: Vec<String> = service
            .list(ALICE)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, ["Hers"]);
    }

    #[tokio::test]
    async fn test_empty_fields_rejected() {
        let store = MemoryMovieStore::new();
        let service = MovieService::new(&store);

        let empty_title = MovieDraft {
            title: "  ".to_owned(),
            description: "d".to_owned(),
        };
        assert!(matches!(
            service.create(ALICE, empty_title).await.unwrap_err(),
            MovieError::Validation(_)
        ));
        assert_eq!(store.len(), 0);
    }
}
