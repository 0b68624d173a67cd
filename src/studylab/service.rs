// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Study-lab generation
//!
//! Turns pasted legal text into flashcards, a mind map, and a briefing note
//! through the same provider seam and retry policy as the content feeds.
//! Unlike the fetch-batch family these operations surface their errors, so a
//! caller can distinguish bad input from a backend outage.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::feed::config::FeedConfig;
use crate::feed::gemini::GeminiProvider;
use crate::feed::provider::{GenerationRequest, GenerativeProvider};
use crate::feed::retry::{with_retry, RetryPolicy};
use crate::feed::types::FeedError;

use super::types::{BriefingNote, Flashcard, MindMap, StudyKit};

/// Upper bound on pasted source text, in characters
const MAX_SOURCE_CHARS: usize = 50_000;

/// Flashcards requested per generation
const FLASHCARD_COUNT: usize = 12;

/// Study-lab generation service
pub struct StudyLabService {
    provider: Arc<dyn GenerativeProvider>,
    retry: RetryPolicy,
}

impl StudyLabService {
    /// Create a study-lab service backed by the configured Gemini provider
    pub fn new(config: &FeedConfig) -> Self {
        let provider = Arc::new(GeminiProvider::new(
            config.provider.gemini_api_key.clone().unwrap_or_default(),
            config.provider.model.clone(),
            config.request_timeout_ms,
        ));

        Self::with_provider(config.retry.clone(), provider)
    }

    /// Create a study-lab service with an explicit backend provider
    pub fn with_provider(retry: RetryPolicy, provider: Arc<dyn GenerativeProvider>) -> Self {
        Self { provider, retry }
    }

    /// Generate flashcards from pasted legal text
    pub async fn generate_flashcards(
        &self,
        source_text: &str,
    ) -> Result<Vec<Flashcard>, FeedError> {
        Self::validate_source(source_text)?;

        self.generate_artifact(
            format!(
                "You are preparing study aids for a law office. Create up to {} flashcards \
                 covering the key holdings, tests, and definitions in the source text below. \
                 Questions must be answerable from the text alone.\n\nSource text:\n{}",
                FLASHCARD_COUNT, source_text
            ),
            flashcard_schema(),
        )
        .await
    }

    /// Generate a mind map from pasted legal text
    pub async fn generate_mind_map(&self, source_text: &str) -> Result<MindMap, FeedError> {
        Self::validate_source(source_text)?;

        self.generate_artifact(
            format!(
                "You are preparing study aids for a law office. Build a mind map of the source \
                 text below: one central topic, three to six branches, each with two to five \
                 short supporting points taken from the text.\n\nSource text:\n{}",
                source_text
            ),
            mind_map_schema(),
        )
        .await
    }

    /// Generate a briefing note from pasted legal text
    pub async fn generate_brief(&self, source_text: &str) -> Result<BriefingNote, FeedError> {
        Self::validate_source(source_text)?;

        self.generate_artifact(
            format!(
                "You are preparing study aids for a law office. Write a briefing note over the \
                 source text below: material facts, the legal issues raised, the holding, the \
                 reasoning in brief, and the practical significance if the text states one. \
                 Stay strictly within the text.\n\nSource text:\n{}",
                source_text
            ),
            briefing_schema(),
        )
        .await
    }

    /// Generate the full study kit: flashcards, mind map, and briefing note
    ///
    /// The three artifacts are generated concurrently; all must succeed.
    pub async fn build_study_kit(&self, source_text: &str) -> Result<StudyKit, FeedError> {
        Self::validate_source(source_text)?;

        let (flashcards, mind_map, brief) = tokio::join!(
            self.generate_flashcards(source_text),
            self.generate_mind_map(source_text),
            self.generate_brief(source_text),
        );

        Ok(StudyKit {
            flashcards: flashcards?,
            mind_map: mind_map?,
            brief: brief?,
            generated_at: Utc::now(),
        })
    }

    async fn generate_artifact<T: DeserializeOwned>(
        &self,
        instructions: String,
        schema: Value,
    ) -> Result<T, FeedError> {
        if !self.provider.is_available() {
            return Err(FeedError::ProviderUnavailable {
                provider: self.provider.name().to_string(),
            });
        }

        let request = GenerationRequest::new(instructions, schema);
        if let Some(ref id) = request.request_id {
            debug!("Generating study artifact, request {}", id);
        }

        let payload = with_retry(&self.retry, || self.provider.generate(&request)).await?;

        serde_json::from_str(&payload).map_err(|e| FeedError::ParseError {
            reason: format!("payload does not match schema: {}", e),
        })
    }

    fn validate_source(source_text: &str) -> Result<(), FeedError> {
        if source_text.trim().is_empty() {
            return Err(FeedError::InvalidRequest {
                reason: "source text is empty".to_string(),
            });
        }
        if source_text.chars().count() > MAX_SOURCE_CHARS {
            return Err(FeedError::InvalidRequest {
                reason: format!("source text exceeds {} characters", MAX_SOURCE_CHARS),
            });
        }
        Ok(())
    }
}

fn flashcard_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "answer": { "type": "STRING" }
            },
            "required": ["question", "answer"]
        }
    })
}

fn mind_map_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "centralTopic": { "type": "STRING" },
            "branches": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "topic": { "type": "STRING" },
                        "points": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        }
                    },
                    "required": ["topic", "points"]
                }
            }
        },
        "required": ["centralTopic", "branches"]
    })
}

fn briefing_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "facts": { "type": "STRING" },
            "issues": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "holding": { "type": "STRING" },
            "reasoning": { "type": "STRING" },
            "significance": { "type": "STRING" }
        },
        "required": ["title", "facts", "issues", "holding", "reasoning"]
    })
}
