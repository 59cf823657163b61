// SPDX-License-Identifier: MIT

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (set FIRESTORE_EMULATOR_HOST). The emulator provides a clean
//! state for each test run.

use kitchen_hub::models::{DailyLog, MealSlot, Recipe, RecipeCandidate, User};

mod common;
use common::test_db;

/// Unique suffix for test isolation across runs.
fn unique_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
        .to_string()
}

fn test_user(suffix: &str) -> User {
    User::new(
        format!("test-{}@example.com", suffix),
        "$argon2id$fake$hash".to_string(),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_create_and_lookup() {
    require_emulator!();

    let db = test_db().await;
    let user = test_user(&unique_suffix());

    let before = db.find_user_by_email(&user.email).await.unwrap();
    assert!(before.is_none(), "User should not exist before creation");

    db.insert_user(&user).await.unwrap();

    let fetched = db.get_user(&user.id).await.unwrap().unwrap();
    assert_eq!(fetched.email, user.email);
    assert_eq!(fetched.username, user.username);

    let by_email = db.find_user_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn test_duplicate_user_id_is_conflict() {
    require_emulator!();

    let db = test_db().await;
    let user = test_user(&unique_suffix());

    db.insert_user(&user).await.unwrap();
    let err = db.insert_user(&user).await.unwrap_err();
    assert!(matches!(err, kitchen_hub::error::AppError::Conflict(_)));
}

// ═══════════════════════════════════════════════════════════════════════════
// RECIPE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_recipes_are_owner_scoped() {
    require_emulator!();

    let db = test_db().await;
    let suffix = unique_suffix();
    let owner = format!("owner-{}", suffix);
    let stranger = format!("stranger-{}", suffix);

    let candidate = RecipeCandidate {
        title: "Test Ramen".to_string(),
        ingredients: vec!["noodles".to_string(), "broth".to_string()],
        instructions: kitchen_hub::models::Instructions::Text("Boil and serve.".to_string()),
    };
    let recipe = Recipe::from_candidate(candidate, &owner);
    db.insert_recipe(&recipe).await.unwrap();

    // Owner sees it
    let fetched = db.get_recipe(&recipe.id, &owner).await.unwrap();
    assert!(fetched.is_some());

    // A different user gets None, indistinguishable from missing
    let hidden = db.get_recipe(&recipe.id, &stranger).await.unwrap();
    assert!(hidden.is_none());

    let listed = db.list_recipes(&owner).await.unwrap();
    assert!(listed.iter().any(|r| r.id == recipe.id));

    db.delete_recipe(&recipe.id).await.unwrap();
    assert!(db.get_recipe(&recipe.id, &owner).await.unwrap().is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// DAILY LOG TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_one_log_per_user_per_day() {
    require_emulator!();

    let db = test_db().await;
    let user_id = format!("logger-{}", unique_suffix());

    let log = DailyLog::new(&user_id, "2024-03-05");
    db.insert_log(&log).await.unwrap();

    // A second create for the same (user, date) conflicts
    let duplicate = DailyLog::new(&user_id, "2024-03-05");
    let err = db.insert_log(&duplicate).await.unwrap_err();
    assert!(matches!(err, kitchen_hub::error::AppError::Conflict(_)));

    let fetched = db.get_log(&user_id, "2024-03-05").await.unwrap().unwrap();
    assert_eq!(fetched.id, DailyLog::doc_id(&user_id, "2024-03-05"));
}

#[tokio::test]
async fn test_month_query_spans_only_that_month() {
    require_emulator!();

    let db = test_db().await;
    let user_id = format!("calendar-{}", unique_suffix());

    let mut in_month = DailyLog::new(&user_id, "2024-03-05");
    in_month.push_meal(MealSlot::Breakfast, "2 eggs".into(), 200);
    db.insert_log(&in_month).await.unwrap();

    let edge = DailyLog::new(&user_id, "2024-03-31");
    db.insert_log(&edge).await.unwrap();

    let out_of_month = DailyLog::new(&user_id, "2024-04-01");
    db.insert_log(&out_of_month).await.unwrap();

    let logs = db.logs_for_month(&user_id, "2024-03").await.unwrap();
    let dates: Vec<&str> = logs.iter().map(|l| l.date.as_str()).collect();

    assert!(dates.contains(&"2024-03-05"));
    assert!(dates.contains(&"2024-03-31"));
    assert!(!dates.contains(&"2024-04-01"));
}
