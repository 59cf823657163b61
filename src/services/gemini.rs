// SPDX-License-Identifier: MIT

//! Gemini completion-provider client.
//!
//! The provider is an opaque text-completion function: one prompt string in,
//! one response string out. Prompt construction and response parsing live in
//! the generation/estimation gateways; this client only does the round-trip.

use crate::error::AppError;
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

/// An unbounded hang here would block the calling request, so the round-trip
/// gets a fixed budget.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client for the given API key and model.
    ///
    /// Fails if the HTTP client cannot be built, so a missing request
    /// timeout can never slip through silently.
    pub fn new(api_key: String, model: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed building Gemini HTTP client")?;

        Ok(Self {
            http,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key,
            model,
        })
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Submit a prompt and return the raw response text.
    ///
    /// Exactly one provider call per invocation; no retries, no fan-out.
    pub async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AiProvider(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AiProvider(format!("HTTP {}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::AiProvider(format!("JSON parse error: {}", e)))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::AiProvider("Empty completion response".to_string()));
        }

        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_timeout() {
        let client = GeminiClient::new("key".into(), "gemini-1.5-flash".into());
        assert!(client.is_ok());
    }
}
