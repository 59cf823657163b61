// SPDX-License-Identifier: MIT

//! Estimation gateway: calorie estimates for logged meals and workouts.
//!
//! Builds a one-line prompt from a structured entry description and extracts
//! an integer from whatever text the provider returns. Logging is
//! best-effort: an unparsable estimate becomes zero, never a failed request.

use crate::forms::flex_opt_string;
use serde::Deserialize;

/// Structured meal description from the log form.
#[derive(Debug, Clone, Deserialize)]
pub struct MealData {
    pub name: String,
    #[serde(default, deserialize_with = "flex_opt_string")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_string")]
    pub size: Option<String>,
}

/// Structured workout description from the log form. All attributes are
/// optional free-form values.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutData {
    #[serde(rename = "type")]
    pub activity: String,
    #[serde(default, deserialize_with = "flex_opt_string")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_string")]
    pub distance: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_string")]
    pub sets: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_string")]
    pub reps: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_string")]
    pub weight: Option<String>,
}

/// Render `"{quantity} {size} {name}"`, defaulting quantity to "1" and
/// skipping absent parts instead of leaving gaps.
pub fn describe_meal(meal: &MealData) -> String {
    let quantity = meal.quantity.as_deref().unwrap_or("1");
    [quantity, meal.size.as_deref().unwrap_or(""), meal.name.trim()]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the activity plus a parenthesized list of only the attributes that
/// were supplied, each with its unit suffix.
pub fn describe_workout(workout: &WorkoutData) -> String {
    let mut description = workout.activity.trim().to_string();
    let mut details = Vec::new();

    if let Some(duration) = &workout.duration {
        details.push(format!("{} min", duration));
    }
    if let Some(distance) = &workout.distance {
        details.push(format!("{} mi", distance));
    }
    if let Some(sets) = &workout.sets {
        details.push(format!("{} sets", sets));
    }
    if let Some(reps) = &workout.reps {
        details.push(format!("{} reps", reps));
    }
    if let Some(weight) = &workout.weight {
        details.push(format!("{} lbs", weight));
    }

    if !details.is_empty() {
        description.push_str(&format!(" ({})", details.join(", ")));
    }
    description
}

/// One-line calorie estimation prompt for a meal.
pub fn build_meal_prompt(description: &str) -> String {
    format!(
        "Estimate the calories for the following meal: \"{}\". \
         Respond with only a single number.",
        description
    )
}

/// One-line calories-burned estimation prompt for a workout.
pub fn build_workout_prompt(description: &str) -> String {
    format!(
        "Estimate the calories burned for the following workout activity: \"{}\". \
         Respond with only a single number.",
        description
    )
}

/// Extract an integer from free-text model output by discarding every
/// non-digit character. No digits (or overflow) yields zero.
pub fn extract_calories(text: &str) -> u32 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_meal_full() {
        let meal = MealData {
            name: "ramen".into(),
            quantity: Some("2".into()),
            size: Some("large bowls".into()),
        };
        assert_eq!(describe_meal(&meal), "2 large bowls ramen");
    }

    #[test]
    fn test_describe_meal_defaults_quantity_and_skips_size() {
        let meal = MealData {
            name: "apple".into(),
            quantity: None,
            size: None,
        };
        // No double space where size would have been
        assert_eq!(describe_meal(&meal), "1 apple");
    }

    #[test]
    fn test_describe_workout_only_supplied_attributes() {
        let workout = WorkoutData {
            activity: "Running".into(),
            duration: Some("30".into()),
            distance: Some("3".into()),
            sets: None,
            reps: None,
            weight: None,
        };
        assert_eq!(describe_workout(&workout), "Running (30 min, 3 mi)");
    }

    #[test]
    fn test_describe_workout_no_attributes() {
        let workout = WorkoutData {
            activity: "Yoga".into(),
            duration: None,
            distance: None,
            sets: None,
            reps: None,
            weight: None,
        };
        assert_eq!(describe_workout(&workout), "Yoga");
    }

    #[test]
    fn test_describe_workout_lifting() {
        let workout = WorkoutData {
            activity: "Deadlift".into(),
            duration: None,
            distance: None,
            sets: Some("3".into()),
            reps: Some("5".into()),
            weight: Some("225".into()),
        };
        assert_eq!(
            describe_workout(&workout),
            "Deadlift (3 sets, 5 reps, 225 lbs)"
        );
    }

    #[test]
    fn test_prompts_ask_for_single_number() {
        assert!(build_meal_prompt("1 apple").contains("only a single number"));
        assert!(build_workout_prompt("Yoga").contains("calories burned"));
    }

    #[test]
    fn test_extract_calories() {
        assert_eq!(extract_calories("450"), 450);
        assert_eq!(extract_calories("About 450 calories."), 450);
        assert_eq!(extract_calories("Roughly **1,200** kcal"), 1200);
    }

    #[test]
    fn test_extract_calories_defaults_to_zero() {
        assert_eq!(extract_calories("I cannot estimate that."), 0);
        assert_eq!(extract_calories(""), 0);
        // Absurdly long digit strings overflow to the zero default
        assert_eq!(extract_calories("99999999999999999999"), 0);
    }
}
