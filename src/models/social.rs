// SPDX-License-Identifier: MIT

//! Ratings and comments embedded in saved recipes and workouts.
//!
//! These are owned child records with their own ids, always mutated through
//! the parent entity so the store's per-document atomicity covers them.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// One user's rating of a saved entity. At most one per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Rating author's user id
    pub user: String,
    /// 1..=5
    pub rating: u8,
}

/// A comment on a saved entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    /// Comment author's user id
    pub user: String,
    /// Author display name at posting time; not rewritten on username change
    pub username: String,
    pub comment: String,
    pub created_at: String,
}

/// Reject ratings outside 1..=5 before any store access.
pub fn validate_rating(value: u8) -> Result<(), AppError> {
    if !(1..=5).contains(&value) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

/// Upsert a rating: replace the caller's existing entry in place, otherwise
/// append. List order is preserved on update.
pub fn upsert_rating(ratings: &mut Vec<Rating>, user_id: &str, value: u8) -> Result<(), AppError> {
    validate_rating(value)?;

    match ratings.iter_mut().find(|r| r.user == user_id) {
        Some(existing) => existing.rating = value,
        None => ratings.push(Rating {
            user: user_id.to_string(),
            rating: value,
        }),
    }
    Ok(())
}

/// Prepend a comment (most-recent-first) with an author-name snapshot.
pub fn add_comment(
    comments: &mut Vec<Comment>,
    user_id: &str,
    username: &str,
    text: &str,
) -> Result<(), AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest(
            "Comment text is required".to_string(),
        ));
    }

    comments.insert(
        0,
        Comment {
            id: uuid::Uuid::new_v4().to_string(),
            user: user_id.to_string(),
            username: username.to_string(),
            comment: text.to_string(),
            created_at: crate::time_utils::now_rfc3339(),
        },
    );
    Ok(())
}

/// Remove a comment. Only the original author may delete; a mismatch is an
/// authorization error, not a not-found (comment existence is not sensitive).
pub fn remove_comment(
    comments: &mut Vec<Comment>,
    comment_id: &str,
    caller_id: &str,
) -> Result<(), AppError> {
    let index = comments
        .iter()
        .position(|c| c.id == comment_id)
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    if comments[index].user != caller_id {
        return Err(AppError::Forbidden(
            "Not authorized to delete this comment".to_string(),
        ));
    }

    comments.remove(index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_upsert_replaces_in_place() {
        let mut ratings = vec![
            Rating {
                user: "u1".into(),
                rating: 2,
            },
            Rating {
                user: "u2".into(),
                rating: 5,
            },
        ];

        upsert_rating(&mut ratings, "u1", 4).unwrap();

        assert_eq!(ratings.len(), 2);
        // u1 stays in slot 0 with the new value
        assert_eq!(ratings[0], Rating { user: "u1".into(), rating: 4 });
        assert_eq!(ratings[1].user, "u2");
    }

    #[test]
    fn test_rating_upsert_appends_new_user() {
        let mut ratings = Vec::new();
        upsert_rating(&mut ratings, "u1", 3).unwrap();
        upsert_rating(&mut ratings, "u2", 5).unwrap();
        assert_eq!(ratings.len(), 2);
    }

    #[test]
    fn test_rating_range_enforced() {
        let mut ratings = Vec::new();
        assert!(upsert_rating(&mut ratings, "u1", 0).is_err());
        assert!(upsert_rating(&mut ratings, "u1", 6).is_err());
        assert!(ratings.is_empty());
    }

    #[test]
    fn test_comments_prepend_and_snapshot_username() {
        let mut comments = Vec::new();
        add_comment(&mut comments, "u1", "alice", "first").unwrap();
        add_comment(&mut comments, "u2", "bob", "  second  ").unwrap();

        assert_eq!(comments[0].comment, "second");
        assert_eq!(comments[0].username, "bob");
        assert_eq!(comments[1].comment, "first");
    }

    #[test]
    fn test_empty_comment_rejected() {
        let mut comments = Vec::new();
        assert!(add_comment(&mut comments, "u1", "alice", "   ").is_err());
    }

    #[test]
    fn test_comment_delete_author_only() {
        let mut comments = Vec::new();
        add_comment(&mut comments, "u1", "alice", "mine").unwrap();
        let id = comments[0].id.clone();

        let err = remove_comment(&mut comments, &id, "u2").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(comments.len(), 1);

        remove_comment(&mut comments, &id, "u1").unwrap();
        assert!(comments.is_empty());
    }

    #[test]
    fn test_comment_delete_unknown_id() {
        let mut comments = Vec::new();
        let err = remove_comment(&mut comments, "nope", "u1").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
