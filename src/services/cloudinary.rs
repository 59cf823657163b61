// SPDX-License-Identifier: MIT

//! Cloudinary image-host client.
//!
//! Opaque upload-by-bytes: one signed POST per request, returning the hosted
//! URL. Uploads land in a per-user folder.

use crate::error::AppError;
use anyhow::Context;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cloudinary API client.
#[derive(Clone)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryClient {
    /// Fails if the HTTP client cannot be built, so a missing request
    /// timeout can never slip through silently.
    pub fn new(cloud_name: String, api_key: String, api_secret: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed building Cloudinary HTTP client")?;

        Ok(Self {
            http,
            base_url: "https://api.cloudinary.com/v1_1".to_string(),
            cloud_name,
            api_key,
            api_secret,
        })
    }

    /// Point the client at a different endpoint (tests).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Upload one image and return its hosted URL.
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: String,
        user_id: &str,
    ) -> Result<String, AppError> {
        let url = format!("{}/{}/image/upload", self.base_url, self.cloud_name);
        let folder = format!("kitchen_hub/{}", user_id);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
            .as_secs();

        let signature = sign_upload(&folder, timestamp, &self.api_secret);

        let form = reqwest::multipart::Form::new()
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", folder)
            .text("signature_algorithm", "sha256")
            .text("signature", signature)
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(filename),
            );

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::ImageHost(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ImageHost(format!("HTTP {}: {}", status, body)));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::ImageHost(format!("JSON parse error: {}", e)))?;

        Ok(parsed.secure_url)
    }
}

/// Cloudinary request signature: SHA-256 over the alphabetically-ordered
/// parameter string with the API secret appended.
fn sign_upload(folder: &str, timestamp: u64, api_secret: &str) -> String {
    let to_sign = format!("folder={}&timestamp={}{}", folder, timestamp, api_secret);
    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_timeout() {
        let client = CloudinaryClient::new("cloud".into(), "key".into(), "secret".into());
        assert!(client.is_ok());
    }

    #[test]
    fn test_signature_is_stable_hex() {
        let a = sign_upload("kitchen_hub/u1", 1_700_000_000, "secret");
        let b = sign_upload("kitchen_hub/u1", 1_700_000_000, "secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_depends_on_inputs() {
        let base = sign_upload("kitchen_hub/u1", 1_700_000_000, "secret");
        assert_ne!(base, sign_upload("kitchen_hub/u2", 1_700_000_000, "secret"));
        assert_ne!(base, sign_upload("kitchen_hub/u1", 1_700_000_001, "secret"));
        assert_ne!(base, sign_upload("kitchen_hub/u1", 1_700_000_000, "other"));
    }
}
