// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generative backend provider trait

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::types::FeedError;

/// One request to the generative backend
///
/// Carries free-text instructions plus the strict output schema the response
/// payload must conform to.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Free-text instructions for the model
    pub instructions: String,
    /// Schema describing the expected response payload
    pub response_schema: Value,
    /// Request ID for log correlation
    pub request_id: Option<String>,
}

impl GenerationRequest {
    /// Create a request with a fresh request ID
    pub fn new(instructions: String, response_schema: Value) -> Self {
        Self {
            instructions,
            response_schema,
            request_id: Some(Uuid::new_v4().to_string()),
        }
    }
}

/// Trait for implementing generative backends
///
/// A provider executes one generation request and returns the raw payload
/// text, classifying failures into the transient/terminal taxonomy of
/// [`FeedError`].
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Execute one generation request
    ///
    /// # Returns
    /// The raw response payload (JSON text conforming to the request schema)
    /// or a classified error
    async fn generate(&self, request: &GenerationRequest) -> Result<String, FeedError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider is usable (has an API key, etc.)
    fn is_available(&self) -> bool;
}
