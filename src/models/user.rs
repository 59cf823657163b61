// SPDX-License-Identifier: MIT

//! User model for storage and profile updates.

use serde::{Deserialize, Serialize};

/// Height in imperial units, the way the profile form captures it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Height {
    pub feet: u8,
    pub inches: u8,
}

/// User profile stored in Firestore, keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Email address (unique across users)
    pub email: String,
    /// Display name (unique; defaults to the email local part at signup)
    pub username: String,
    /// Argon2id PHC hash, never the raw password
    pub password_hash: String,
    pub age: Option<u32>,
    pub height: Option<Height>,
    /// Weight in pounds
    pub weight: Option<f64>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub foods_to_avoid: Vec<String>,
    /// Titles the user rejected via feedback, excluded from future generation
    #[serde(default)]
    pub disliked_recipes: Vec<String>,
    #[serde(default)]
    pub disliked_workouts: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// Create a fresh account with a username derived from the email.
    pub fn new(email: String, password_hash: String) -> Self {
        let username = email
            .split('@')
            .next()
            .unwrap_or(email.as_str())
            .to_string();
        let now = crate::time_utils::now_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            username,
            password_hash,
            age: None,
            height: None,
            weight: None,
            allergies: Vec::new(),
            foods_to_avoid: Vec::new(),
            disliked_recipes: Vec::new(),
            disliked_workouts: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Case-insensitive union of the allergy and avoid lists (lowercased).
    pub fn restriction_set(&self) -> std::collections::HashSet<String> {
        self.allergies
            .iter()
            .chain(self.foods_to_avoid.iter())
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Alternate username for when the email-derived default is already taken.
/// The caller never picked that name, so signup must not fail on it.
pub fn fallback_username(base: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", base, &suffix[..6])
}

/// Deduplicate a tag list case-insensitively, keeping first occurrence and
/// original casing, dropping blank entries.
pub fn dedup_tags(tags: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_lowercase()))
        .collect()
}
