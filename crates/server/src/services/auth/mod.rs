//! Authentication service.
//!
//! Orchestrates sign-up and sign-in over the user store, the password
//! hasher, and the token service.

mod error;
pub mod password;
pub mod tokens;

pub use error::AuthError;
pub use tokens::{Principal, TokenService};

use reelvault_core::Email;

use crate::db::{StoreError, UserStore};

/// Authentication service.
///
/// Takes its collaborators as explicit constructor arguments; handlers build
/// one per request from the shared state.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore, tokens: &'a TokenService) -> Self {
        Self { users, tokens }
    }

    /// Register a new user and return a bearer token for them.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::WeakPassword` if the
    /// input fails validation, and `AuthError::CredentialsTaken` if the email
    /// is already registered. The response never distinguishes which
    /// constraint the store rejected.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = password::hash(password)?;

        let user = self
            .users
            .create(&email, &password_hash)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AuthError::CredentialsTaken,
                other => AuthError::Store(other),
            })?;

        tracing::info!(user_id = %user.id, "user signed up");

        self.tokens.issue(user.id, &user.email)
    }

    /// Authenticate with email and password and return a fresh bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` whether the email is unknown
    /// or the password is wrong; the two cases are indistinguishable.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = Email::parse(email)?;

        let Some((user, stored_hash)) = self.users.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        password::verify(&stored_hash, password)?;

        self.tokens.issue(user.id, &user.email)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::WeakPassword("password cannot be empty".to_owned()));
    }

    Ok(())
}
