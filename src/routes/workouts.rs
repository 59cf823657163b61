// SPDX-License-Identifier: MIT

//! Saved-workout routes: list, save, delete, generate, rate, comment.

use crate::error::{AppError, Result};
use crate::forms::flex_opt_string;
use crate::middleware::auth::AuthUser;
use crate::models::{social, Workout, WorkoutCandidate};
use crate::services::generation::{build_workout_prompt, parse_candidates, WorkoutFilters};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::recipes::DeleteResponse;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/workouts", get(list_workouts).post(save_workout))
        .route("/workouts/generate", post(generate_workouts))
        .route("/workouts/{id}", delete(delete_workout))
        .route("/workouts/{id}/rate", post(rate_workout))
        .route("/workouts/{id}/comment", post(comment_workout))
        .route(
            "/workouts/{id}/comment/{comment_id}",
            delete(delete_comment),
        )
}

// ─── List / Save / Delete ────────────────────────────────────

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<Workout>>> {
    Ok(Json(state.db.list_workouts(&auth.user_id).await?))
}

/// Persist a generated candidate as a saved workout owned by the caller.
async fn save_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(candidate): Json<WorkoutCandidate>,
) -> Result<(StatusCode, Json<Workout>)> {
    if candidate.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let workout = Workout::from_candidate(candidate, &auth.user_id);
    state.db.insert_workout(&workout).await?;
    tracing::debug!(user_id = %auth.user_id, workout_id = %workout.id, "Workout saved");

    Ok((StatusCode::CREATED, Json(workout)))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let workout = state
        .db
        .get_workout(&id, &auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    state.db.delete_workout(&workout.id).await?;
    Ok(Json(DeleteResponse {
        message: "Workout deleted successfully".to_string(),
    }))
}

// ─── Generation ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateWorkoutsRequest {
    #[serde(default, deserialize_with = "flex_opt_string")]
    target_body_parts: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_string")]
    equipment: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_string")]
    difficulty: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_string")]
    workout_length: Option<String>,
    #[serde(default)]
    use_free_weights: bool,
    #[serde(default, deserialize_with = "flex_opt_string")]
    free_weight_amount: Option<String>,
}

/// Generate ten workout candidates. Nothing is persisted.
async fn generate_workouts(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<GenerateWorkoutsRequest>,
) -> Result<Json<Vec<WorkoutCandidate>>> {
    let filters = WorkoutFilters {
        target_body_parts: body.target_body_parts,
        equipment: body.equipment,
        difficulty: body.difficulty,
        workout_length: body.workout_length,
        use_free_weights: body.use_free_weights,
        free_weight_amount: body.free_weight_amount,
    };

    if filters.is_empty() {
        return Err(AppError::BadRequest(
            "Please provide at least one search criteria".to_string(),
        ));
    }

    let user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let prompt = build_workout_prompt(&user, &filters);
    let raw = state.ai.complete(&prompt).await?;
    let candidates: Vec<WorkoutCandidate> = parse_candidates(&raw)?;

    tracing::debug!(
        user_id = %auth.user_id,
        count = candidates.len(),
        "Workout candidates generated"
    );
    Ok(Json(candidates))
}

// ─── Ratings / Comments ──────────────────────────────────────

#[derive(Deserialize)]
struct RateRequest {
    rating: u8,
}

async fn rate_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<RateRequest>,
) -> Result<Json<Workout>> {
    social::validate_rating(body.rating)?;

    let mut workout = state
        .db
        .get_workout(&id, &auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    social::upsert_rating(&mut workout.ratings, &auth.user_id, body.rating)?;
    workout.updated_at = crate::time_utils::now_rfc3339();
    state.db.update_workout(&workout).await?;

    Ok(Json(workout))
}

#[derive(Deserialize)]
struct CommentRequest {
    #[serde(default)]
    comment: String,
}

async fn comment_workout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Workout>)> {
    let user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut workout = state
        .db
        .get_workout(&id, &auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    social::add_comment(
        &mut workout.comments,
        &auth.user_id,
        &user.username,
        &body.comment,
    )?;
    workout.updated_at = crate::time_utils::now_rfc3339();
    state.db.update_workout(&workout).await?;

    Ok((StatusCode::CREATED, Json(workout)))
}

async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Workout>> {
    let mut workout = state
        .db
        .get_workout(&id, &auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    social::remove_comment(&mut workout.comments, &comment_id, &auth.user_id)?;
    workout.updated_at = crate::time_utils::now_rfc3339();
    state.db.update_workout(&workout).await?;

    Ok(Json(workout))
}
