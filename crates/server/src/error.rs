//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that holds the only status-code
//! mapping in the crate. All route handlers return `Result<T, AppError>`.
//! Server-side faults are captured to Sentry before responding; clients only
//! ever see a generic message for them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::StoreError;
use crate::services::{AuthError, MovieError, UserError};

/// Application-level error type for the catalog server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed outside a service.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Profile operation failed.
    #[error("User error: {0}")]
    User(#[from] UserError),

    /// Movie operation failed.
    #[error("Movie error: {0}")]
    Movie(#[from] MovieError),

    /// Request carried no valid identity.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this is a server-side fault rather than a client outcome.
    fn is_server_fault(&self) -> bool {
        match self {
            Self::Store(_) | Self::Internal(_) => true,
            Self::Auth(err) => matches!(
                err,
                AuthError::Store(_) | AuthError::PasswordHash | AuthError::TokenSigning
            ),
            Self::User(err) => matches!(err, UserError::Store(_)),
            Self::Movie(err) => matches!(err, MovieError::Store(_)),
            Self::Unauthenticated | Self::BadRequest(_) => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_fault() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );

            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response();
        }

        let (status, message) = match &self {
            Self::Auth(err) => match err {
                AuthError::CredentialsTaken => {
                    (StatusCode::FORBIDDEN, "credentials already taken".to_owned())
                }
                AuthError::InvalidCredentials => {
                    (StatusCode::FORBIDDEN, "invalid credentials".to_owned())
                }
                AuthError::InvalidToken => {
                    (StatusCode::UNAUTHORIZED, "invalid or expired token".to_owned())
                }
                AuthError::InvalidEmail(_) => {
                    (StatusCode::BAD_REQUEST, "invalid email address".to_owned())
                }
                AuthError::WeakPassword(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                // Covered by is_server_fault above.
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_owned()),
            },
            Self::User(err) => match err {
                UserError::InvalidEmail(_) => {
                    (StatusCode::BAD_REQUEST, "invalid email address".to_owned())
                }
                UserError::EmailTaken => (StatusCode::FORBIDDEN, "email already in use".to_owned()),
                UserError::Store(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_owned())
                }
            },
            Self::Movie(err) => match err {
                MovieError::AccessDenied => {
                    (StatusCode::FORBIDDEN, "access to resources denied".to_owned())
                }
                MovieError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                MovieError::Store(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_owned())
                }
            },
            Self::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "authentication required".to_owned())
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Store(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_owned())
            }
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_client_outcome_status_codes() {
        assert_eq!(
            get_status(AppError::Auth(AuthError::CredentialsTaken)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Movie(MovieError::AccessDenied)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("nope".to_owned())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_server_faults_hide_details() {
        let response = AppError::Internal("pool exhausted".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_conflict_outside_services_is_a_fault() {
        // Conflicts are translated to domain errors by the services; one
        // reaching the top level untranslated is a bug, not a client outcome.
        assert_eq!(
            get_status(AppError::Store(StoreError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
