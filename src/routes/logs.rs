// SPDX-License-Identifier: MIT

//! Daily log routes: per-day aggregates of meals, workouts, journal notes
//! and photos, plus the monthly calendar rollup.

use crate::error::{AppError, Result};
use crate::forms::flex_opt_string;
use crate::middleware::auth::AuthUser;
use crate::models::{DailyLog, ImageKind, MealSlot};
use crate::services::estimation::{
    self, build_meal_prompt, build_workout_prompt, describe_meal, describe_workout,
};
use crate::time_utils::{month_prefix, now_rfc3339, validate_log_date};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/logs/month", get(month_summary))
        .route("/logs/meal", post(log_meal))
        .route("/logs/workout", post(log_workout))
        .route("/logs/journal", put(update_journal))
        .route("/logs/image", post(attach_image))
        .route("/logs/meal/{log_id}/{meal_id}", delete(delete_meal))
        .route(
            "/logs/workout/{log_id}/{workout_id}",
            delete(delete_workout),
        )
        .route("/logs/image/{log_id}/{image_id}", delete(delete_image))
        .route("/logs/{date}", get(get_log))
}

/// Get-or-create the aggregate for (caller, date). The first write creates
/// the document; a racing create surfaces as a conflict from the store.
async fn load_or_new(state: &AppState, user_id: &str, date: &str) -> Result<(DailyLog, bool)> {
    match state.db.get_log(user_id, date).await? {
        Some(log) => Ok((log, true)),
        None => Ok((DailyLog::new(user_id, date), false)),
    }
}

async fn persist(state: &AppState, log: &mut DailyLog, existed: bool) -> Result<()> {
    log.updated_at = now_rfc3339();
    if existed {
        state.db.update_log(log).await
    } else {
        state.db.insert_log(log).await
    }
}

fn parse_date(date: &str) -> Result<&str> {
    if !validate_log_date(date) {
        return Err(AppError::BadRequest(
            "Date must be in YYYY-MM-DD format".to_string(),
        ));
    }
    Ok(date)
}

// ─── Read ────────────────────────────────────────────────────

/// One day's log. A day with no log yet is an empty object, not a 404, so
/// the client renders a blank day without special-casing.
async fn get_log(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(date): Path<String>,
) -> Result<Json<serde_json::Value>> {
    parse_date(&date)?;

    match state.db.get_log(&auth.user_id, &date).await? {
        Some(log) => Ok(Json(serde_json::to_value(log).map_err(|e| {
            AppError::Database(format!("Failed to serialize log: {}", e))
        })?)),
        None => Ok(Json(serde_json::json!({}))),
    }
}

#[derive(Deserialize)]
struct MonthQuery {
    year: Option<i32>,
    month: Option<u32>,
}

/// Per-day calorie totals for the calendar view.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub calories_in: u32,
    pub calories_out: u32,
}

/// Collapse a month of logs into date-keyed totals.
pub fn monthly_rollup(logs: &[DailyLog]) -> HashMap<String, DayTotals> {
    logs.iter()
        .map(|log| {
            (
                log.date.clone(),
                DayTotals {
                    calories_in: log.calories_in(),
                    calories_out: log.calories_out(),
                },
            )
        })
        .collect()
}

/// Calendar rollup for a month. `month` is zero-based to match the client's
/// calendar widget (0 = January).
async fn month_summary(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<HashMap<String, DayTotals>>> {
    let (year, month) = match (query.year, query.month) {
        (Some(year), Some(month)) => (year, month),
        _ => {
            return Err(AppError::BadRequest(
                "Both year and month query parameters are required".to_string(),
            ))
        }
    };

    let prefix = month_prefix(year, month)
        .ok_or_else(|| AppError::BadRequest("Invalid year or month".to_string()))?;

    let logs = state.db.logs_for_month(&auth.user_id, &prefix).await?;
    Ok(Json(monthly_rollup(&logs)))
}

// ─── Meal / Workout entries ──────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogMealRequest {
    #[serde(default)]
    date: String,
    meal_type: MealSlot,
    meal_data: estimation::MealData,
}

/// Log a meal: estimate its calories, then append it to the day's aggregate.
/// An unparsable estimate is stored as zero; a provider outage fails the
/// request and nothing is persisted.
async fn log_meal(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<LogMealRequest>,
) -> Result<(StatusCode, Json<DailyLog>)> {
    parse_date(&body.date)?;
    if body.meal_data.name.trim().is_empty() {
        return Err(AppError::BadRequest("Meal name is required".to_string()));
    }

    let description = describe_meal(&body.meal_data);
    let raw = state.ai.complete(&build_meal_prompt(&description)).await?;
    let calories = estimation::extract_calories(&raw);

    let (mut log, existed) = load_or_new(&state, &auth.user_id, &body.date).await?;
    log.push_meal(body.meal_type, description, calories);
    persist(&state, &mut log, existed).await?;

    Ok((StatusCode::CREATED, Json(log)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogWorkoutRequest {
    #[serde(default)]
    date: String,
    workout_data: estimation::WorkoutData,
}

/// Log a workout with a calories-burned estimate, same flow as meals.
async fn log_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<LogWorkoutRequest>,
) -> Result<(StatusCode, Json<DailyLog>)> {
    parse_date(&body.date)?;
    if body.workout_data.activity.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Workout type is required".to_string(),
        ));
    }

    let description = describe_workout(&body.workout_data);
    let raw = state
        .ai
        .complete(&build_workout_prompt(&description))
        .await?;
    let calories_burned = estimation::extract_calories(&raw);

    let (mut log, existed) = load_or_new(&state, &auth.user_id, &body.date).await?;
    log.push_workout(description, calories_burned);
    persist(&state, &mut log, existed).await?;

    Ok((StatusCode::CREATED, Json(log)))
}

// ─── Journal ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JournalRequest {
    #[serde(default)]
    date: String,
    #[serde(default, deserialize_with = "flex_opt_string")]
    meal_notes: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_string")]
    workout_notes: Option<String>,
}

/// Update journal notes for a day. Only supplied fields are written; an
/// absent field leaves the existing note untouched.
async fn update_journal(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<JournalRequest>,
) -> Result<Json<DailyLog>> {
    parse_date(&body.date)?;

    let (mut log, existed) = load_or_new(&state, &auth.user_id, &body.date).await?;
    if let Some(notes) = body.meal_notes {
        log.meal_notes = notes;
    }
    if let Some(notes) = body.workout_notes {
        log.workout_notes = notes;
    }
    persist(&state, &mut log, existed).await?;

    Ok(Json(log))
}

// ─── Images ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttachImageRequest {
    #[serde(default)]
    date: String,
    #[serde(rename = "type")]
    kind: ImageKind,
    #[serde(default)]
    url: String,
}

/// Attach an already-uploaded image URL to a day's log.
async fn attach_image(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<AttachImageRequest>,
) -> Result<(StatusCode, Json<DailyLog>)> {
    parse_date(&body.date)?;
    if body.url.trim().is_empty() {
        return Err(AppError::BadRequest("Image url is required".to_string()));
    }

    let (mut log, existed) = load_or_new(&state, &auth.user_id, &body.date).await?;
    log.push_image(body.kind, body.url);
    persist(&state, &mut log, existed).await?;

    Ok((StatusCode::CREATED, Json(log)))
}

// ─── Entry removal ───────────────────────────────────────────

async fn load_owned(state: &AppState, log_id: &str, user_id: &str) -> Result<DailyLog> {
    state
        .db
        .get_log_by_id(log_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Log not found".to_string()))
}

async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((log_id, meal_id)): Path<(String, String)>,
) -> Result<Json<DailyLog>> {
    let mut log = load_owned(&state, &log_id, &auth.user_id).await?;
    if !log.remove_meal(&meal_id) {
        return Err(AppError::NotFound("Meal entry not found".to_string()));
    }
    log.updated_at = now_rfc3339();
    state.db.update_log(&log).await?;
    Ok(Json(log))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((log_id, workout_id)): Path<(String, String)>,
) -> Result<Json<DailyLog>> {
    let mut log = load_owned(&state, &log_id, &auth.user_id).await?;
    if !log.remove_workout(&workout_id) {
        return Err(AppError::NotFound("Workout entry not found".to_string()));
    }
    log.updated_at = now_rfc3339();
    state.db.update_log(&log).await?;
    Ok(Json(log))
}

async fn delete_image(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((log_id, image_id)): Path<(String, String)>,
) -> Result<Json<DailyLog>> {
    let mut log = load_owned(&state, &log_id, &auth.user_id).await?;
    if !log.remove_image(&image_id) {
        return Err(AppError::NotFound("Image entry not found".to_string()));
    }
    log.updated_at = now_rfc3339();
    state.db.update_log(&log).await?;
    Ok(Json(log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealSlot;

    #[test]
    fn test_monthly_rollup_totals_per_day() {
        let mut day1 = DailyLog::new("u1", "2024-03-05");
        day1.push_meal(MealSlot::Breakfast, "2 eggs".into(), 200);
        day1.push_meal(MealSlot::Dinner, "1 plate pasta".into(), 400);
        day1.push_workout("Running (30 min)".into(), 300);

        let mut day2 = DailyLog::new("u1", "2024-03-06");
        day2.push_meal(MealSlot::Lunch, "1 sandwich".into(), 350);

        let rollup = monthly_rollup(&[day1, day2]);

        assert_eq!(rollup.len(), 2);
        assert_eq!(
            rollup["2024-03-05"],
            DayTotals {
                calories_in: 600,
                calories_out: 300,
            }
        );
        assert_eq!(
            rollup["2024-03-06"],
            DayTotals {
                calories_in: 350,
                calories_out: 0,
            }
        );
    }

    #[test]
    fn test_monthly_rollup_empty_month() {
        assert!(monthly_rollup(&[]).is_empty());
    }

    #[test]
    fn test_day_totals_wire_shape() {
        let totals = DayTotals {
            calories_in: 600,
            calories_out: 300,
        };
        assert_eq!(
            serde_json::to_string(&totals).unwrap(),
            r#"{"caloriesIn":600,"caloriesOut":300}"#
        );
    }
}
