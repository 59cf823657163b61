// SPDX-License-Identifier: MIT

//! Image upload route. Accepts a multipart form and hands the bytes to the
//! image host; the returned URL is what clients attach to a daily log.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/upload", post(upload_image))
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Upload an image from the `image` multipart field.
async fn upload_image(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field
            .file_name()
            .unwrap_or("upload")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read image data: {}", e)))?;

        if bytes.is_empty() {
            return Err(AppError::BadRequest("Image file is empty".to_string()));
        }

        let url = state
            .images
            .upload_image(bytes.to_vec(), filename, &auth.user_id)
            .await?;

        tracing::debug!(user_id = %auth.user_id, "Image uploaded");
        return Ok((StatusCode::CREATED, Json(UploadResponse { url })));
    }

    Err(AppError::BadRequest(
        "An image file is required".to_string(),
    ))
}
