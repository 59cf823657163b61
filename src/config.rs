// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.
//!
//! Secrets (JWT key, Gemini API key, Cloudinary credentials) are read once
//! at startup and cached in memory for the lifetime of the process.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,

    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Gemini API key for the completion provider
    pub gemini_api_key: String,
    /// Gemini model name
    pub gemini_model: String,
    /// Cloudinary cloud name (public)
    pub cloudinary_cloud_name: String,
    /// Cloudinary API key
    pub cloudinary_api_key: String,
    /// Cloudinary API secret (used to sign uploads)
    pub cloudinary_api_secret: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            cloudinary_cloud_name: env::var("CLOUDINARY_CLOUD_NAME")
                .map_err(|_| ConfigError::Missing("CLOUDINARY_CLOUD_NAME"))?,
            cloudinary_api_key: env::var("CLOUDINARY_API_KEY")
                .map_err(|_| ConfigError::Missing("CLOUDINARY_API_KEY"))?,
            cloudinary_api_secret: env::var("CLOUDINARY_API_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("CLOUDINARY_API_SECRET"))?,
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            gemini_api_key: "test_gemini_key".to_string(),
            gemini_model: "gemini-1.5-flash".to_string(),
            cloudinary_cloud_name: "test-cloud".to_string(),
            cloudinary_api_key: "test_api_key".to_string(),
            cloudinary_api_secret: "test_api_secret".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("GEMINI_API_KEY", "test_gemini");
        env::set_var("CLOUDINARY_CLOUD_NAME", "demo");
        env::set_var("CLOUDINARY_API_KEY", "key");
        env::set_var("CLOUDINARY_API_SECRET", "secret");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.gemini_api_key, "test_gemini");
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.port, 8080);
    }
}
