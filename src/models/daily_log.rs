// SPDX-License-Identifier: MIT

//! The per-user-per-day log aggregate.
//!
//! One document per (user, date); the pairing is enforced by deriving the
//! document id from both, so a racing first write surfaces as a create
//! conflict instead of a duplicate.

use serde::{Deserialize, Serialize};

/// Which meal of the day an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// What a log photo shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Meal,
    Workout,
}

/// A logged meal with its best-effort calorie estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub id: String,
    pub meal_type: MealSlot,
    pub description: String,
    pub calories: u32,
}

/// A logged workout with its best-effort calories-burned estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub id: String,
    pub description: String,
    pub calories_burned: u32,
}

/// A photo attached to the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ImageKind,
    pub url: String,
}

/// A full day of logging for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    /// Document id, always `"{user_id}_{date}"`
    pub id: String,
    pub user_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub meals: Vec<MealEntry>,
    #[serde(default)]
    pub workouts: Vec<WorkoutEntry>,
    #[serde(default)]
    pub meal_notes: String,
    #[serde(default)]
    pub workout_notes: String,
    #[serde(default)]
    pub images: Vec<ImageEntry>,
    pub created_at: String,
    pub updated_at: String,
}

impl DailyLog {
    /// Deterministic document id carrying the one-log-per-user-per-day rule.
    pub fn doc_id(user_id: &str, date: &str) -> String {
        format!("{}_{}", user_id, date)
    }

    /// Construct an empty aggregate for get-or-create. Not yet persisted.
    pub fn new(user_id: &str, date: &str) -> Self {
        let now = crate::time_utils::now_rfc3339();
        Self {
            id: Self::doc_id(user_id, date),
            user_id: user_id.to_string(),
            date: date.to_string(),
            meals: Vec::new(),
            workouts: Vec::new(),
            meal_notes: String::new(),
            workout_notes: String::new(),
            images: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn push_meal(&mut self, meal_type: MealSlot, description: String, calories: u32) {
        self.meals.push(MealEntry {
            id: uuid::Uuid::new_v4().to_string(),
            meal_type,
            description,
            calories,
        });
    }

    pub fn push_workout(&mut self, description: String, calories_burned: u32) {
        self.workouts.push(WorkoutEntry {
            id: uuid::Uuid::new_v4().to_string(),
            description,
            calories_burned,
        });
    }

    pub fn push_image(&mut self, kind: ImageKind, url: String) {
        self.images.push(ImageEntry {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            url,
        });
    }

    /// Remove a meal entry by id. Returns false if no entry matched.
    pub fn remove_meal(&mut self, meal_id: &str) -> bool {
        let before = self.meals.len();
        self.meals.retain(|m| m.id != meal_id);
        self.meals.len() != before
    }

    /// Remove a workout entry by id. Returns false if no entry matched.
    pub fn remove_workout(&mut self, workout_id: &str) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != workout_id);
        self.workouts.len() != before
    }

    /// Remove an image entry by id. Returns false if no entry matched.
    pub fn remove_image(&mut self, image_id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|i| i.id != image_id);
        self.images.len() != before
    }

    /// Total estimated calories eaten this day.
    pub fn calories_in(&self) -> u32 {
        self.meals.iter().map(|m| m.calories).sum()
    }

    /// Total estimated calories burned this day.
    pub fn calories_out(&self) -> u32 {
        self.workouts.iter().map(|w| w.calories_burned).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_id_pairs_user_and_date() {
        assert_eq!(DailyLog::doc_id("u1", "2024-03-05"), "u1_2024-03-05");
    }

    #[test]
    fn test_meal_slot_wire_names() {
        assert_eq!(
            serde_json::to_string(&MealSlot::Breakfast).unwrap(),
            r#""Breakfast""#
        );
        assert_eq!(serde_json::to_string(&ImageKind::Meal).unwrap(), r#""meal""#);
        let slot: MealSlot = serde_json::from_str(r#""Snack""#).unwrap();
        assert_eq!(slot, MealSlot::Snack);
        assert!(serde_json::from_str::<MealSlot>(r#""Brunch""#).is_err());
    }

    #[test]
    fn test_entry_removal_by_id() {
        let mut log = DailyLog::new("u1", "2024-03-05");
        log.push_meal(MealSlot::Lunch, "1 bowl ramen".into(), 550);
        log.push_meal(MealSlot::Snack, "1 apple".into(), 80);
        let id = log.meals[0].id.clone();

        assert!(log.remove_meal(&id));
        assert_eq!(log.meals.len(), 1);
        assert!(!log.remove_meal(&id));
    }

    #[test]
    fn test_day_totals() {
        let mut log = DailyLog::new("u1", "2024-03-05");
        log.push_meal(MealSlot::Breakfast, "2 eggs".into(), 200);
        log.push_meal(MealSlot::Dinner, "1 plate pasta".into(), 400);
        log.push_workout("Running (30 min)".into(), 300);

        assert_eq!(log.calories_in(), 600);
        assert_eq!(log.calories_out(), 300);
    }
}
