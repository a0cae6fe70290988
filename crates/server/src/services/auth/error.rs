//! Authentication error types.

use thiserror::Error;

use reelvault_core::EmailError;

use crate::db::StoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password failed validation.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Sign-up email collision.
    #[error("credentials already taken")]
    CredentialsTaken,

    /// Sign-in failure. Deliberately the same for an unknown email and a
    /// wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token failed validation. One variant for every cause: bad signature,
    /// malformed payload, and expiry are indistinguishable to callers.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Token signing failed.
    #[error("token signing error")]
    TokenSigning,

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
