//! Movie domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use reelvault_core::{MovieId, UserId};

/// A catalog entry owned by a single user.
#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    /// Unique movie ID.
    pub id: MovieId,
    /// User who owns this entry.
    pub owner_id: UserId,
    /// Movie title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The caller-supplied fields of a movie, used for both create and replace.
///
/// The owner is never part of this type; it is always taken from the
/// authenticated principal.
#[derive(Debug, Clone)]
pub struct MovieDraft {
    pub title: String,
    pub description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_serialized_movie_exposes_owner() {
        let movie = Movie {
            id: MovieId::new(3),
            owner_id: UserId::new(7),
            title: "First Movie".to_owned(),
            description: "First movie description".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["owner_id"], 7);
        assert_eq!(json["title"], "First Movie");
    }
}
