// SPDX-License-Identifier: MIT

//! Account routes: signup, login, profile, generation feedback.

use crate::error::{AppError, Result};
use crate::forms::{flex_opt_f64, flex_opt_u32};
use crate::middleware::auth::{create_jwt, AuthUser};
use crate::models::user::{dedup_tags, fallback_username};
use crate::models::{Height, User};
use crate::services::password;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Routes that issue tokens (no auth required).
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/signup", post(signup))
        .route("/users/login", post(login))
}

/// Profile and feedback routes (auth applied in routes/mod.rs).
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/profile", get(get_profile).put(update_profile))
        .route("/users/feedback", post(submit_feedback))
}

// ─── Signup / Login ──────────────────────────────────────────

#[derive(Deserialize)]
struct CredentialsRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let email = body.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    if body.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    if state.db.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password_hash = password::hash_password(&body.password)?;
    let mut user = User::new(email, password_hash);

    // The default username comes from the email local part, not from the
    // caller; a collision gets a suffixed fallback instead of a rejection.
    if state
        .db
        .find_user_by_username(&user.username)
        .await?
        .is_some()
    {
        user.username = fallback_username(&user.username);
    }

    state.db.insert_user(&user).await?;
    tracing::info!(user_id = %user.id, "New user signed up");

    let token = create_jwt(&user.id, &state.config.jwt_signing_key)?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>> {
    let email = body.email.trim().to_lowercase();

    // Unknown email and wrong password are deliberately indistinguishable
    let user = state.db.find_user_by_email(&email).await?;
    let valid = user
        .as_ref()
        .map(|u| password::verify_password(&body.password, &u.password_hash))
        .unwrap_or(false);

    let user = match (user, valid) {
        (Some(user), true) => user,
        _ => return Err(AppError::BadRequest("Invalid credentials".to_string())),
    };

    let token = create_jwt(&user.id, &state.config.jwt_signing_key)?;
    Ok(Json(TokenResponse { token }))
}

// ─── Profile ─────────────────────────────────────────────────

/// Profile as the client sees it: everything but the password hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub age: Option<u32>,
    pub height: Option<Height>,
    pub weight: Option<f64>,
    pub allergies: Vec<String>,
    pub foods_to_avoid: Vec<String>,
    pub disliked_recipes: Vec<String>,
    pub disliked_workouts: Vec<String>,
    pub created_at: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            age: user.age,
            height: user.height,
            weight: user.weight,
            allergies: user.allergies,
            foods_to_avoid: user.foods_to_avoid,
            disliked_recipes: user.disliked_recipes,
            disliked_workouts: user.disliked_workouts,
            created_at: user.created_at,
        }
    }
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest {
    username: Option<String>,
    email: Option<String>,
    #[serde(default, deserialize_with = "flex_opt_u32")]
    age: Option<u32>,
    height: Option<Height>,
    #[serde(default, deserialize_with = "flex_opt_f64")]
    weight: Option<f64>,
    allergies: Option<Vec<String>>,
    foods_to_avoid: Option<Vec<String>>,
    current_password: Option<String>,
    new_password: Option<String>,
}

/// Update profile fields; absent fields are left unchanged.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    let mut user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(username) = body.username {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::BadRequest("Username cannot be empty".to_string()));
        }
        if username != user.username {
            if let Some(other) = state.db.find_user_by_username(&username).await? {
                if other.id != user.id {
                    return Err(AppError::Conflict("Username already taken".to_string()));
                }
            }
            user.username = username;
        }
    }

    if let Some(email) = body.email {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::BadRequest("A valid email is required".to_string()));
        }
        if email != user.email {
            if let Some(other) = state.db.find_user_by_email(&email).await? {
                if other.id != user.id {
                    return Err(AppError::Conflict("Email already in use".to_string()));
                }
            }
            user.email = email;
        }
    }

    if let Some(age) = body.age {
        user.age = Some(age);
    }
    if let Some(height) = body.height {
        user.height = Some(height);
    }
    if let Some(weight) = body.weight {
        user.weight = Some(weight);
    }
    if let Some(allergies) = body.allergies {
        user.allergies = dedup_tags(&allergies);
    }
    if let Some(foods) = body.foods_to_avoid {
        user.foods_to_avoid = dedup_tags(&foods);
    }

    if let Some(new_password) = body.new_password {
        let current = body
            .current_password
            .ok_or_else(|| AppError::BadRequest("Current password is required".to_string()))?;
        if !password::verify_password(&current, &user.password_hash) {
            return Err(AppError::BadRequest(
                "Incorrect current password".to_string(),
            ));
        }
        user.password_hash = password::hash_password(&new_password)?;
    }

    user.updated_at = crate::time_utils::now_rfc3339();
    state.db.update_user(&user).await?;

    Ok(Json(user.into()))
}

// ─── Feedback ────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackRequest {
    disliked_recipe_title: Option<String>,
    disliked_workout_title: Option<String>,
}

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub message: String,
}

/// Record a disliked title so future generation prompts exclude it.
async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>> {
    let (title, is_recipe) = match (&body.disliked_recipe_title, &body.disliked_workout_title) {
        (Some(title), _) => (title.trim(), true),
        (None, Some(title)) => (title.trim(), false),
        (None, None) => {
            return Err(AppError::BadRequest(
                "A disliked recipe or workout title is required".to_string(),
            ))
        }
    };
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let mut user = state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let list = if is_recipe {
        &mut user.disliked_recipes
    } else {
        &mut user.disliked_workouts
    };

    if !list.iter().any(|t| t.eq_ignore_ascii_case(title)) {
        list.push(title.to_string());
        user.updated_at = crate::time_utils::now_rfc3339();
        state.db.update_user(&user).await?;
    }

    Ok(Json(FeedbackResponse {
        message: "Feedback recorded.".to_string(),
    }))
}
