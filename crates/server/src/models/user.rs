//! User domain types.
//!
//! The public [`User`] shape has no password field at all. The stored hash is
//! handed out only by [`crate::db::UserStore::find_by_email`], as a separate
//! value, for the sign-in path.

use chrono::{DateTime, Utc};
use serde::Serialize;

use reelvault_core::{Email, UserId};

/// A registered user (domain type).
///
/// This is also the response shape for user endpoints; serializing it can
/// never leak a credential because the hash is not part of the type.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Optional first name.
    pub first_name: Option<String>,
    /// Optional last name.
    pub last_name: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A set of profile edits to apply to a user row.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<Email>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
