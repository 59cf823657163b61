// SPDX-License-Identifier: MIT

//! Saved workouts and generated workout candidates.

use crate::models::social::{Comment, Rating};
use serde::{Deserialize, Serialize};

/// A workout saved by a user, stored in Firestore keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    /// Owning user; set at creation, never changed
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub equipment_needed: Vec<String>,
    pub difficulty: Option<String>,
    pub workout_length: Option<String>,
    /// Tutorial video link, usually a YouTube search URL
    pub video_url: Option<String>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: String,
    pub updated_at: String,
}

/// A generated workout suggestion, parsed from the provider's JSON array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutCandidate {
    pub title: String,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub equipment_needed: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub workout_length: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl Workout {
    /// Persist a candidate for `user_id`: new id, empty ratings and comments.
    pub fn from_candidate(candidate: WorkoutCandidate, user_id: &str) -> Self {
        let now = crate::time_utils::now_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: candidate.title,
            target_muscles: candidate.target_muscles,
            instructions: candidate.instructions,
            equipment_needed: candidate.equipment_needed,
            difficulty: candidate.difficulty,
            workout_length: candidate.workout_length,
            video_url: candidate.video_url,
            ratings: Vec::new(),
            comments: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_tolerates_missing_optionals() {
        let json = r#"{
            "title": "Leg Day",
            "targetMuscles": ["Quads"],
            "instructions": ["Squat: 3 sets of 12 reps."]
        }"#;

        let candidate: WorkoutCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.title, "Leg Day");
        assert!(candidate.equipment_needed.is_empty());
        assert!(candidate.video_url.is_none());
    }

    #[test]
    fn test_save_candidate_copies_fields() {
        let candidate = WorkoutCandidate {
            title: "Push Day".into(),
            target_muscles: vec!["Chest".into()],
            instructions: vec!["Bench: 4x10.".into()],
            equipment_needed: vec!["Barbell".into()],
            difficulty: Some("Medium".into()),
            workout_length: Some("45 mins".into()),
            video_url: None,
        };

        let workout = Workout::from_candidate(candidate, "u9");
        assert_eq!(workout.user_id, "u9");
        assert_eq!(workout.difficulty.as_deref(), Some("Medium"));
        assert!(workout.ratings.is_empty());
        assert!(workout.comments.is_empty());
    }
}
