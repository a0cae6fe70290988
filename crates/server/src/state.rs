//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::{MovieStore, UserStore};
use crate::services::TokenService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the store adapters behind their traits
/// so the same router runs over Postgres in production and the in-memory
/// stores in tests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    users: Arc<dyn UserStore>,
    movies: Arc<dyn MovieStore>,
    tokens: TokenService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStore>,
        movies: Arc<dyn MovieStore>,
        tokens: TokenService,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                users,
                movies,
                tokens,
            }),
        }
    }

    /// Get the user store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    /// Get the movie store.
    #[must_use]
    pub fn movies(&self) -> &dyn MovieStore {
        self.inner.movies.as_ref()
    }

    /// Get the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }
}
