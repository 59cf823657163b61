// SPDX-License-Identifier: MIT

//! Generation gateway: prompt construction and response parsing for
//! AI-suggested recipes and workouts.
//!
//! Everything here is pure; the provider round-trip happens in the route
//! handler via [`GeminiClient`](crate::services::GeminiClient).

use crate::error::AppError;
use crate::models::User;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

/// How many suggestions every generation prompt asks for.
pub const CANDIDATE_COUNT: usize = 10;

/// Normalized recipe generation filters.
#[derive(Debug, Default, Clone)]
pub struct RecipeFilters {
    pub ingredients: Option<String>,
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    pub budget: Option<f64>,
    pub calories: Option<u32>,
}

impl RecipeFilters {
    /// True if any non-ingredient criterion was supplied. A request whose
    /// ingredients all get filtered away is still satisfiable when one of
    /// these is present.
    pub fn has_secondary(&self) -> bool {
        self.cuisine.is_some()
            || self.diet.is_some()
            || self.budget.is_some()
            || self.calories.is_some()
    }
}

/// Normalized workout generation filters.
#[derive(Debug, Default, Clone)]
pub struct WorkoutFilters {
    pub target_body_parts: Option<String>,
    pub equipment: Option<String>,
    pub difficulty: Option<String>,
    pub workout_length: Option<String>,
    pub use_free_weights: bool,
    pub free_weight_amount: Option<String>,
}

impl WorkoutFilters {
    pub fn is_empty(&self) -> bool {
        self.target_body_parts.is_none()
            && self.equipment.is_none()
            && self.difficulty.is_none()
            && self.workout_length.is_none()
    }
}

/// Split a comma-separated ingredient string and drop entries matching the
/// user's restriction set (case-insensitive). Original casing is preserved
/// for the survivors.
pub fn filter_ingredients(raw: &str, restrictions: &HashSet<String>) -> Vec<String> {
    raw.split(',')
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .filter(|i| !restrictions.contains(&i.to_lowercase()))
        .map(|i| i.to_string())
        .collect()
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

/// Compose the recipe generation prompt.
///
/// Output shape first, hard MUST-NOT constraints (allergies, avoid list,
/// disliked titles) before soft preferences.
pub fn build_recipe_prompt(user: &User, filters: &RecipeFilters, available: &[String]) -> String {
    let mut prompt = format!(
        "You are an expert chef creating recipes for a user with specific needs. \
         Adhere to all of the following constraints strictly.\n\
         Generate {} unique recipe ideas based on the provided ingredients.\n\
         Your response must be a valid JSON array of objects. Each object must have these keys: \
         \"title\", \"ingredients\" (as an array of strings), and \"instructions\" \
         (as an array of strings).\n\
         Do not include any text or markdown formatting outside of the main JSON array.\n\n\
         **Primary Ingredients Available:**\n- {}\n\n\
         **Absolute Dietary Restrictions (Recipes MUST NOT contain these):**\n\
         - Allergies: {}\n- Foods to Avoid: {}\n",
        CANDIDATE_COUNT,
        join_or_none(available),
        join_or_none(&user.allergies),
        join_or_none(&user.foods_to_avoid),
    );

    if !user.disliked_recipes.is_empty() {
        prompt.push_str(&format!(
            "\n**Disliked Recipes (DO NOT GENERATE THESE OR SIMILAR TITLES):**\n- {}\n",
            user.disliked_recipes.join("\n- ")
        ));
    }
    if let Some(cuisine) = &filters.cuisine {
        prompt.push_str(&format!(
            "\n**Cuisine Style:**\n- The user has requested the following cuisine style(s): \
             \"{}\". Please adhere to this.",
            cuisine
        ));
    }
    if let Some(diet) = &filters.diet {
        prompt.push_str(&format!(
            "\n**Specific Diet:**\n- The recipe must adhere to the following diet(s): \"{}\".",
            diet
        ));
    }
    if let Some(budget) = filters.budget {
        prompt.push_str(&format!(
            "\n**Budget Constraint:**\n- The user has a budget of ${} for any additional \
             ingredients. Prioritize using the primary ingredients.",
            budget
        ));
    }
    if let Some(calories) = filters.calories {
        prompt.push_str(&format!(
            "\n**Calorie Constraint:**\n- Each recipe generated MUST have approximately {} \
             calories per serving. This is a strict requirement.",
            calories
        ));
    }

    prompt
}

/// Compose the workout generation prompt.
pub fn build_workout_prompt(user: &User, filters: &WorkoutFilters) -> String {
    let height = user
        .height
        .map(|h| format!("{}'{}\"", h.feet, h.inches))
        .unwrap_or_else(|| "N/A".to_string());
    let weight = user
        .weight
        .map(|w| format!("{} lbs", w))
        .unwrap_or_else(|| "N/A".to_string());
    let age = user
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "Not provided".to_string());

    let mut prompt = format!(
        "You are an expert fitness trainer creating workouts for a user. \
         Your response MUST be a valid JSON array of {} objects.\n\
         Each object must have these keys: \"title\" (string), \"targetMuscles\" \
         (array of strings), \"equipmentNeeded\" (array of strings), \"instructions\" \
         (array of strings), and \"videoUrl\" (a YouTube search URL string, or null).\n\
         Do not include any text or markdown formatting outside of the main JSON array.\n\n\
         **User's Biometrics for consideration:**\n- Age: {}\n- Height: {}\n- Weight: {}\n\n\
         **User's Request:**\n- Target Body Parts: {}\n- Available Equipment: {}\n\
         - Desired Difficulty: {}\n- Desired Workout Length: {}\n",
        CANDIDATE_COUNT,
        age,
        height,
        weight,
        filters.target_body_parts.as_deref().unwrap_or("Any"),
        filters.equipment.as_deref().unwrap_or("Bodyweight"),
        filters.difficulty.as_deref().unwrap_or("Any"),
        filters.workout_length.as_deref().unwrap_or("Any"),
    );

    if filters.use_free_weights {
        if let Some(amount) = &filters.free_weight_amount {
            prompt.push_str(&format!(
                "- The user is using free weights of the following weight: {}.\n",
                amount
            ));
        }
    }
    if !user.disliked_workouts.is_empty() {
        prompt.push_str(&format!(
            "\n**Disliked Workouts (DO NOT GENERATE THESE OR SIMILAR TITLES):**\n- {}\n",
            user.disliked_workouts.join("\n- ")
        ));
    }
    prompt.push_str(
        "For the \"videoUrl\", create a YouTube search link like \
         \"https://www.youtube.com/results?search_query=how+to+do+[exercise+name]\".",
    );

    prompt
}

/// Strip surrounding ``` code fences the provider sometimes adds.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the provider's response as a JSON array of candidates.
///
/// A malformed response is an upstream-provider error, never a panic and
/// never blamed on the user.
pub fn parse_candidates<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, AppError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned)
        .map_err(|e| AppError::AiProvider(format!("Unparsable candidate array: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Height, RecipeCandidate, WorkoutCandidate};

    fn test_user() -> User {
        let mut user = User::new("chef@example.com".into(), "hash".into());
        user.age = Some(30);
        user.height = Some(Height { feet: 5, inches: 10 });
        user.weight = Some(170.0);
        user.allergies = vec!["Peanut".into()];
        user.foods_to_avoid = vec!["Cilantro".into()];
        user
    }

    #[test]
    fn test_filter_ingredients_case_insensitive() {
        let restrictions: HashSet<String> = ["peanut".to_string()].into();
        let kept = filter_ingredients("Peanut, Chicken, Rice", &restrictions);
        // Casing of survivors is preserved
        assert_eq!(kept, vec!["Chicken", "Rice"]);
    }

    #[test]
    fn test_filter_ingredients_drops_blanks() {
        let restrictions = HashSet::new();
        assert_eq!(
            filter_ingredients("Rice,, ,Beans", &restrictions),
            vec!["Rice", "Beans"]
        );
    }

    #[test]
    fn test_recipe_prompt_hard_constraints_before_soft() {
        let user = test_user();
        let filters = RecipeFilters {
            cuisine: Some("Thai".into()),
            calories: Some(500),
            ..Default::default()
        };
        let prompt = build_recipe_prompt(&user, &filters, &["Chicken".into(), "Rice".into()]);

        assert!(prompt.contains("10 unique recipe ideas"));
        assert!(prompt.contains("MUST NOT contain"));
        assert!(prompt.contains("Allergies: Peanut"));
        assert!(prompt.contains("Chicken, Rice"));
        let hard = prompt.find("MUST NOT").unwrap();
        let soft = prompt.find("Cuisine Style").unwrap();
        assert!(hard < soft);
        assert!(prompt.contains("approximately 500 calories"));
    }

    #[test]
    fn test_recipe_prompt_includes_dislikes() {
        let mut user = test_user();
        user.disliked_recipes = vec!["Peanut Surprise".into()];
        let prompt = build_recipe_prompt(&user, &RecipeFilters::default(), &["Rice".into()]);
        assert!(prompt.contains("DO NOT GENERATE"));
        assert!(prompt.contains("Peanut Surprise"));
    }

    #[test]
    fn test_workout_prompt_biometrics_and_defaults() {
        let user = test_user();
        let filters = WorkoutFilters {
            target_body_parts: Some("Legs".into()),
            use_free_weights: true,
            free_weight_amount: Some("25 lbs".into()),
            ..Default::default()
        };
        let prompt = build_workout_prompt(&user, &filters);

        assert!(prompt.contains("Age: 30"));
        assert!(prompt.contains("5'10\""));
        assert!(prompt.contains("Target Body Parts: Legs"));
        assert!(prompt.contains("Available Equipment: Bodyweight"));
        assert!(prompt.contains("free weights of the following weight: 25 lbs"));
        assert!(prompt.contains("search_query"));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("[1]"), "[1]");
        assert_eq!(strip_code_fences("  ```\n[]\n```  "), "[]");
    }

    #[test]
    fn test_parse_recipe_candidates_fenced() {
        let raw = r#"```json
        [{"title": "Fried Rice", "ingredients": ["Rice", "Egg"], "instructions": ["Fry it."]}]
        ```"#;
        let candidates: Vec<RecipeCandidate> = parse_candidates(raw).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Fried Rice");
    }

    #[test]
    fn test_parse_candidates_garbage_is_provider_error() {
        let err = parse_candidates::<WorkoutCandidate>("I'm sorry, I can't do that").unwrap_err();
        assert!(matches!(err, AppError::AiProvider(_)));
    }

    #[test]
    fn test_filters_emptiness_helpers() {
        assert!(WorkoutFilters::default().is_empty());
        assert!(!RecipeFilters::default().has_secondary());
        assert!(RecipeFilters {
            diet: Some("vegan".into()),
            ..Default::default()
        }
        .has_secondary());
    }
}
