// SPDX-License-Identifier: MIT

//! Saved recipes and generated recipe candidates.

use crate::models::social::{Comment, Rating};
use serde::{Deserialize, Serialize};

/// Recipe instructions arrive from the provider (and from older saved
/// documents) either as one block of text or as an ordered step list.
/// Both forms are accepted and kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instructions {
    Steps(Vec<String>),
    Text(String),
}

/// A recipe saved by a user, stored in Firestore keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    /// Owning user; set at creation, never changed
    pub user_id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Instructions,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: String,
    pub updated_at: String,
}

/// A generated recipe suggestion, parsed from the provider's JSON array.
/// Transient: it gains identity, owner, ratings, and comments only when saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCandidate {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Instructions,
}

impl Recipe {
    /// Persist a candidate for `user_id`: new id, empty ratings and comments.
    pub fn from_candidate(candidate: RecipeCandidate, user_id: &str) -> Self {
        let now = crate::time_utils::now_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: candidate.title,
            ingredients: candidate.ingredients,
            instructions: candidate.instructions,
            ratings: Vec::new(),
            comments: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
