//! User profile operations.
//!
//! The current-user lookup happens in the request guard; this service only
//! covers profile edits.

use serde::Deserialize;
use thiserror::Error;

use reelvault_core::{Email, EmailError, UserId};

use crate::db::{StoreError, UserStore};
use crate::models::{User, UserChanges};

/// Errors that can occur during profile operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// An email change collided with another account.
    #[error("email already in use")]
    EmailTaken,

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Profile edits, all optional; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// User profile service.
pub struct UserService<'a> {
    users: &'a dyn UserStore,
}

impl<'a> UserService<'a> {
    /// Create a new user service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore) -> Self {
        Self { users }
    }

    /// Apply profile edits to the caller's own row and return the result.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidEmail` if the new email is malformed and
    /// `UserError::EmailTaken` if it belongs to another account.
    pub async fn edit_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<User, UserError> {
        let changes = UserChanges {
            email: update.email.as_deref().map(Email::parse).transpose()?,
            first_name: update.first_name,
            last_name: update.last_name,
        };

        self.users.update(id, &changes).await.map_err(|e| match e {
            StoreError::Conflict(_) => UserError::EmailTaken,
            other => other.into(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryUserStore;

    async fn seeded_store() -> (MemoryUserStore, UserId) {
        let store = MemoryUserStore::new();
        let user = store
            .create(&Email::parse("test@test.com").unwrap(), "hash")
            .await
            .unwrap();
        (store, user.id)
    }

    #[tokio::test]
    async fn test_edit_profile_applies_partial_changes() {
        let (store, id) = seeded_store().await;
        let service = UserService::new(&store);

        let update = ProfileUpdate {
            email: Some("tester@test.com".to_owned()),
            first_name: Some("Tester".to_owned()),
            last_name: None,
        };
        let user = service.edit_profile(id, update).await.unwrap();

        assert_eq!(user.email.as_str(), "tester@test.com");
        assert_eq!(user.first_name.as_deref(), Some("Tester"));
        assert_eq!(user.last_name, None);
    }

    #[tokio::test]
    async fn test_edit_profile_rejects_malformed_email() {
        let (store, id) = seeded_store().await;
        let service = UserService::new(&store);

        let update = ProfileUpdate {
            email: Some("nope".to_owned()),
            ..ProfileUpdate::default()
        };
        assert!(matches!(
            service.edit_profile(id, update).await.unwrap_err(),
            UserError::InvalidEmail(_)
        ));
    }

    #[tokio::test]
    async fn test_edit_profile_rejects_taken_email() {
        let (store, id) = seeded_store().await;
        store
            .create(&Email::parse("other@test.com").unwrap(), "hash")
            .await
            .unwrap();
        let service = UserService::new(&store);

        let update = ProfileUpdate {
            email: Some("other@test.com".to_owned()),
            ..ProfileUpdate::default()
        };
        assert!(matches!(
            service.edit_profile(id, update).await.unwrap_err(),
            UserError::EmailTaken
        ));
    }
}
