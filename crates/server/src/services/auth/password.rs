//! Password hashing.
//!
//! Argon2id with a per-call random salt; two hashes of the same password
//! never match. Verification goes through the argon2 crate, which compares
//! in constant time.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::AuthError;

/// Hash a password using Argon2id.
pub fn hash(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
pub fn verify(stored_hash: &str, password: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(stored_hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_roundtrip() {
        let hashed = hash("supersecurepwd").unwrap();
        assert!(verify(&hashed, "supersecurepwd").is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hashed = hash("supersecurepwd").unwrap();
        assert!(verify(&hashed, "supersecurepwe").is_err());
        assert!(verify(&hashed, "").is_err());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash("supersecurepwd").unwrap();
        let second = hash("supersecurepwd").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify("not-a-phc-string", "supersecurepwd").is_err());
    }
}
