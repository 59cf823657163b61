// SPDX-License-Identifier: MIT

//! Saved-recipe routes: list, save, delete, generate, rate, comment.

use crate::error::{AppError, Result};
use crate::forms::{flex_opt_f64, flex_opt_string, flex_opt_u32};
use crate::middleware::auth::AuthUser;
use crate::models::{social, Recipe, RecipeCandidate};
use crate::services::generation::{
    build_recipe_prompt, filter_ingredients, parse_candidates, RecipeFilters,
};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recipes", get(list_recipes).post(save_recipe))
        .route("/recipes/generate", post(generate_recipes))
        .route("/recipes/{id}", delete(delete_recipe))
        .route("/recipes/{id}/rate", post(rate_recipe))
        .route("/recipes/{id}/comment", post(comment_recipe))
        .route(
            "/recipes/{id}/comment/{comment_id}",
            delete(delete_comment),
        )
}

// ─── List / Save / Delete ────────────────────────────────────

async fn list_recipes(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<Recipe>>> {
    Ok(Json(state.db.list_recipes(&auth.user_id).await?))
}

/// Persist a generated candidate as a saved recipe owned by the caller.
async fn save_recipe(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(candidate): Json<RecipeCandidate>,
) -> Result<(StatusCode, Json<Recipe>)> {
    if candidate.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let recipe = Recipe::from_candidate(candidate, &auth.user_id);
    state.db.insert_recipe(&recipe).await?;
    tracing::debug!(user_id = %auth.user_id, recipe_id = %recipe.id, "Recipe saved");

    Ok((StatusCode::CREATED, Json(recipe)))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    // Owner-scoped lookup: a recipe owned by someone else 404s here
    let recipe = state
        .db
        .get_recipe(&id, &auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_string()))?;

    state.db.delete_recipe(&recipe.id).await?;
    Ok(Json(DeleteResponse {
        message: "Recipe deleted successfully".to_string(),
    }))
}

// ─── Generation ──────────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateRecipesRequest {
    #[serde(default, deserialize_with = "flex_opt_string")]
    ingredients: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_string")]
    cuisine: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_string")]
    diet: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_f64")]
    budget: Option<f64>,
    #[serde(default, deserialize_with = "flex_opt_u32")]
    calories: Option<u32>,
}

/// Generate ten recipe candidates. Nothing is persisted.
async fn generate_recipes(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<GenerateRecipesRequest>,
) -> Result<Json<Vec<RecipeCandidate>>> {
    let filters = RecipeFilters {
        ingredients: body.ingredients,
        cuisine: body.cuisine,
        diet: body.diet,
        budget: body.budget,
        calories: body.calories,
    };

    if filters.ingredients.is_none() && !filters.has_secondary() {
        return Err(AppError::BadRequest(
            "Please provide ingredients or at least one search criteria".to_string(),
        ));
    }

    let user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let restrictions = user.restriction_set();
    let available = filters
        .ingredients
        .as_deref()
        .map(|raw| filter_ingredients(raw, &restrictions))
        .unwrap_or_default();

    // Generating from restrictions alone would be unsatisfiable
    if available.is_empty() && !filters.has_secondary() {
        return Err(AppError::BadRequest(
            "All your ingredients are in your allergy/avoidance list".to_string(),
        ));
    }

    let prompt = build_recipe_prompt(&user, &filters, &available);
    let raw = state.ai.complete(&prompt).await?;
    let candidates: Vec<RecipeCandidate> = parse_candidates(&raw)?;

    tracing::debug!(
        user_id = %auth.user_id,
        count = candidates.len(),
        "Recipe candidates generated"
    );
    Ok(Json(candidates))
}

// ─── Ratings / Comments ──────────────────────────────────────

#[derive(Deserialize)]
struct RateRequest {
    rating: u8,
}

async fn rate_recipe(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<RateRequest>,
) -> Result<Json<Recipe>> {
    social::validate_rating(body.rating)?;

    let mut recipe = state
        .db
        .get_recipe(&id, &auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_string()))?;

    social::upsert_rating(&mut recipe.ratings, &auth.user_id, body.rating)?;
    recipe.updated_at = crate::time_utils::now_rfc3339();
    state.db.update_recipe(&recipe).await?;

    Ok(Json(recipe))
}

#[derive(Deserialize)]
struct CommentRequest {
    #[serde(default)]
    comment: String,
}

async fn comment_recipe(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Recipe>)> {
    let user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut recipe = state
        .db
        .get_recipe(&id, &auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_string()))?;

    social::add_comment(
        &mut recipe.comments,
        &auth.user_id,
        &user.username,
        &body.comment,
    )?;
    recipe.updated_at = crate::time_utils::now_rfc3339();
    state.db.update_recipe(&recipe).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

async fn delete_comment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Recipe>> {
    let mut recipe = state
        .db
        .get_recipe(&id, &auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_string()))?;

    social::remove_comment(&mut recipe.comments, &comment_id, &auth.user_id)?;
    recipe.updated_at = crate::time_utils::now_rfc3339();
    state.db.update_recipe(&recipe).await?;

    Ok(Json(recipe))
}
