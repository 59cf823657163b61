// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (credentials, biometrics, restriction lists)
//! - Recipes and Workouts (saved favorites with ratings/comments)
//! - Daily logs (one aggregate per user per day)
//!
//! All reads and writes of user-owned entities are scoped to the owner here,
//! so a wrong-user lookup is indistinguishable from a missing document.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{DailyLog, Recipe, User, Workout};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Map an insert failure, surfacing duplicate-id creates as a conflict.
    fn map_insert_error(e: firestore::errors::FirestoreError, what: &str) -> AppError {
        match e {
            firestore::errors::FirestoreError::DataConflictError(_) => {
                AppError::Conflict(format!("{} already exists", what))
            }
            other => AppError::Database(other.to_string()),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by id.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Look up a user by email (unique).
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.to_string();
        let mut users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.for_all([q.field("email").eq(email.clone())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.pop())
    }

    /// Look up a user by username (unique).
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let username = username.to_string();
        let mut users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.for_all([q.field("username").eq(username.clone())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.pop())
    }

    /// Create a new user. Fails with a conflict if the id is already taken.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let _: User = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| Self::map_insert_error(e, "User"))?;
        Ok(())
    }

    /// Update an existing user.
    pub async fn update_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Recipe Operations ───────────────────────────────────────

    /// List a user's saved recipes, newest first.
    pub async fn list_recipes(&self, user_id: &str) -> Result<Vec<Recipe>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::RECIPES)
            .filter(move |q| q.for_all([q.field("userId").eq(user_id.clone())]))
            .order_by([(
                "createdAt",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a recipe by id, scoped to its owner. A recipe owned by someone
    /// else comes back as `None`, same as a missing one.
    pub async fn get_recipe(&self, recipe_id: &str, user_id: &str) -> Result<Option<Recipe>, AppError> {
        let recipe: Option<Recipe> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::RECIPES)
            .obj()
            .one(recipe_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(recipe.filter(|r| r.user_id == user_id))
    }

    /// Store a newly saved recipe.
    pub async fn insert_recipe(&self, recipe: &Recipe) -> Result<(), AppError> {
        let _: Recipe = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::RECIPES)
            .document_id(&recipe.id)
            .object(recipe)
            .execute()
            .await
            .map_err(|e| Self::map_insert_error(e, "Recipe"))?;
        Ok(())
    }

    /// Persist rating/comment mutations on a recipe.
    pub async fn update_recipe(&self, recipe: &Recipe) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::RECIPES)
            .document_id(&recipe.id)
            .object(recipe)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a recipe document. Callers must have resolved ownership first
    /// via [`get_recipe`](Self::get_recipe).
    pub async fn delete_recipe(&self, recipe_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::RECIPES)
            .document_id(recipe_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// List a user's saved workouts, newest first.
    pub async fn list_workouts(&self, user_id: &str) -> Result<Vec<Workout>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(move |q| q.for_all([q.field("userId").eq(user_id.clone())]))
            .order_by([(
                "createdAt",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a workout by id, scoped to its owner.
    pub async fn get_workout(
        &self,
        workout_id: &str,
        user_id: &str,
    ) -> Result<Option<Workout>, AppError> {
        let workout: Option<Workout> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WORKOUTS)
            .obj()
            .one(workout_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(workout.filter(|w| w.user_id == user_id))
    }

    /// Store a newly saved workout.
    pub async fn insert_workout(&self, workout: &Workout) -> Result<(), AppError> {
        let _: Workout = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::WORKOUTS)
            .document_id(&workout.id)
            .object(workout)
            .execute()
            .await
            .map_err(|e| Self::map_insert_error(e, "Workout"))?;
        Ok(())
    }

    /// Persist rating/comment mutations on a workout.
    pub async fn update_workout(&self, workout: &Workout) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::WORKOUTS)
            .document_id(&workout.id)
            .object(workout)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a workout document (ownership resolved by the caller).
    pub async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::WORKOUTS)
            .document_id(workout_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Daily Log Operations ────────────────────────────────────

    /// Get the log for (user, date), if one exists.
    pub async fn get_log(&self, user_id: &str, date: &str) -> Result<Option<DailyLog>, AppError> {
        self.get_log_by_id(&DailyLog::doc_id(user_id, date), user_id)
            .await
    }

    /// Get a log by document id, scoped to its owner.
    pub async fn get_log_by_id(
        &self,
        log_id: &str,
        user_id: &str,
    ) -> Result<Option<DailyLog>, AppError> {
        let log: Option<DailyLog> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::DAILY_LOGS)
            .obj()
            .one(log_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(log.filter(|l| l.user_id == user_id))
    }

    /// First write for a (user, date): creates the document, surfacing a
    /// racing duplicate create as a retryable conflict.
    pub async fn insert_log(&self, log: &DailyLog) -> Result<(), AppError> {
        let _: DailyLog = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::DAILY_LOGS)
            .document_id(&log.id)
            .object(log)
            .execute()
            .await
            .map_err(|e| Self::map_insert_error(e, "Daily log"))?;
        Ok(())
    }

    /// Persist mutations to an existing log aggregate.
    pub async fn update_log(&self, log: &DailyLog) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::DAILY_LOGS)
            .document_id(&log.id)
            .object(log)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// All of a user's logs whose date falls in the given `YYYY-MM` month.
    ///
    /// Dates are zero-padded, so the month is a lexicographic range over the
    /// date string.
    pub async fn logs_for_month(
        &self,
        user_id: &str,
        month_prefix: &str,
    ) -> Result<Vec<DailyLog>, AppError> {
        let user_id = user_id.to_string();
        let first = format!("{}-01", month_prefix);
        let last = format!("{}-31", month_prefix);

        self.get_client()?
            .fluent()
            .select()
            .from(collections::DAILY_LOGS)
            .filter(move |q| {
                q.for_all([
                    q.field("userId").eq(user_id.clone()),
                    q.field("date").greater_than_or_equal(first.clone()),
                    q.field("date").less_than_or_equal(last.clone()),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
