//! Bearer token issuance and validation.
//!
//! Tokens are HS256 JWTs carrying the user's ID and email, expiring 15
//! minutes after issuance. There is no refresh path and no server-side
//! token state; validity is a pure function of signature and expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use reelvault_core::{Email, UserId};

use super::AuthError;

/// Token lifetime. Re-authentication via sign-in is the only renewal path.
const TOKEN_TTL_MINUTES: i64 = 15;

/// The authenticated identity carried by a validated token.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: UserId,
    pub email: Email,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: UserId,
    email: String,
    iat: i64,
    exp: i64,
}

/// Issues and validates signed bearer tokens.
///
/// Constructed once at startup from the configured signing secret; safe to
/// share across request handlers.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Create a token service signing with the given secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a token for the given user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if signing fails.
    pub fn issue(&self, user_id: UserId, email: &Email) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(TOKEN_TTL_MINUTES)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| AuthError::TokenSigning)
    }

    /// Validate a token and return the principal it identifies.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for every failure mode; callers
    /// cannot distinguish an expired token from a forged one.
    pub fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AuthError::InvalidToken)?;

        let email = Email::parse(&data.claims.email).map_err(|_| AuthError::InvalidToken)?;

        Ok(Principal {
            id: data.claims.sub,
            email,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::mem::discriminant;

    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("0W8DyKOdmRT3BopGpUwkZabAE7XIvVqz"))
    }

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[test]
    fn test_issue_validate_roundtrip() {
        let tokens = service();
        let token = tokens.issue(UserId::new(7), &email("a@x.com")).unwrap();

        let principal = tokens.validate(&token).unwrap();
        assert_eq!(principal.id, UserId::new(7));
        assert_eq!(principal.email.as_str(), "a@x.com");
    }

    #[test]
    fn test_corrupted_token_rejected() {
        let tokens = service();
        assert!(tokens.validate("invalid.token.here").is_err());
    }

    #[test]
    fn test_different_secrets_reject() {
        let tokens = service();
        let other = TokenService::new(&SecretString::from("ylm1hF6cJ2sj9PqNwXzUKR4avDGtb0eo"));

        let token = tokens.issue(UserId::new(1), &email("a@x.com")).unwrap();
        assert!(other.validate(&token).is_err());
    }

    #[test]
    fn test_expired_and_corrupted_are_indistinguishable() {
        let tokens = service();

        // Sign an already-expired payload with the real key; well past the
        // decoder's expiry leeway.
        let now = Utc::now();
        let claims = Claims {
            sub: UserId::new(1),
            email: "a@x.com".to_owned(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let expired = encode(&Header::default(), &claims, &tokens.encoding).unwrap();

        let expired_err = tokens.validate(&expired).unwrap_err();
        let corrupt_err = tokens.validate("not-even-a-jwt").unwrap_err();
        assert_eq!(discriminant(&expired_err), discriminant(&corrupt_err));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let tokens = service();
        let token = tokens.issue(UserId::new(1), &email("a@x.com")).unwrap();

        // Flip a character in the payload segment.
        let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
        assert_eq!(parts.len(), 3);
        parts[1] = format!("x{}", &parts[1][1..]);
        let tampered = parts.join(".");

        assert!(tokens.validate(&tampered).is_err());
    }
}
