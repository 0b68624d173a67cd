// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gemini generative backend
//!
//! Calls the Gemini `generateContent` endpoint in JSON mode, passing the
//! request's response schema so the payload comes back structured.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::provider::{GenerationRequest, GenerativeProvider};
use super::types::FeedError;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API provider
pub struct GeminiProvider {
    api_key: String,
    model: String,
    timeout_ms: u64,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key
    /// * `model` - Model identifier (e.g. "gemini-2.0-flash")
    /// * `timeout_ms` - Per-request timeout in milliseconds
    pub fn new(api_key: String, model: String, timeout_ms: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            model,
            timeout_ms,
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.model)
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, FeedError> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": request.instructions }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
            }
        });

        if let Some(ref id) = request.request_id {
            debug!("Sending generation request {} to {}", id, self.model);
        }

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FeedError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    FeedError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();

        if status == 429 {
            let message = response.text().await.unwrap_or_default();
            if message.contains("RESOURCE_EXHAUSTED") {
                return Err(FeedError::QuotaExhausted);
            }
            return Err(FeedError::RateLimited {
                retry_after_secs: 60,
            });
        }

        if status == 401 || status == 403 {
            return Err(FeedError::NoApiKey {
                provider: "gemini".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FeedError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let data: GeminiResponse = response.json().await.map_err(|e| FeedError::ParseError {
            reason: format!("JSON parse error: {}", e),
        })?;

        extract_payload(data)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Pull the payload text out of the first candidate
fn extract_payload(response: GeminiResponse) -> Result<String, FeedError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .map(|c| {
            c.content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(FeedError::ParseError {
            reason: "no candidates in response".to_string(),
        });
    }

    Ok(text)
}

#[derive(Debug, serde::Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, serde::Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, serde::Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, serde::Deserialize)]
struct GeminiPart {
    text: String,
}
