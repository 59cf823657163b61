// SPDX-License-Identifier: MIT

//! Kitchen Hub API Server
//!
//! Serves the cooking-and-fitness API: AI recipe/workout generation,
//! saved favorites with ratings and comments, and daily meal/workout logs.

use kitchen_hub::{
    config::Config,
    db::FirestoreDb,
    services::{CloudinaryClient, GeminiClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Kitchen Hub API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Completion provider client, constructed once and shared via AppState
    let ai = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())?;
    tracing::info!(model = %config.gemini_model, "Gemini client initialized");

    // Image host client
    let images = CloudinaryClient::new(
        config.cloudinary_cloud_name.clone(),
        config.cloudinary_api_key.clone(),
        config.cloudinary_api_secret.clone(),
    )?;
    tracing::info!(cloud = %config.cloudinary_cloud_name, "Cloudinary client initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        ai,
        images,
    });

    // Build router
    let app = kitchen_hub::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kitchen_hub=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
