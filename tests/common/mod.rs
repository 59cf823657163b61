// SPDX-License-Identifier: MIT

use kitchen_hub::config::Config;
use kitchen_hub::db::FirestoreDb;
use kitchen_hub::routes::create_router;
use kitchen_hub::services::{CloudinaryClient, GeminiClient};
use kitchen_hub::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();

    // Point external clients at an unroutable endpoint so an accidental
    // provider call fails fast instead of hitting the network.
    let ai = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())
        .expect("Failed to build Gemini client")
        .with_base_url("http://127.0.0.1:9".to_string());
    let images = CloudinaryClient::new(
        config.cloudinary_cloud_name.clone(),
        config.cloudinary_api_key.clone(),
        config.cloudinary_api_secret.clone(),
    )
    .expect("Failed to build Cloudinary client")
    .with_base_url("http://127.0.0.1:9".to_string());

    let state = Arc::new(AppState {
        config,
        db,
        ai,
        images,
    });

    (create_router(state.clone()), state)
}
