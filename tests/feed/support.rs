// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared test support for feed integration tests

use async_trait::async_trait;
use lexfeed::{FeedError, GenerationRequest, GenerativeProvider};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Backend provider returning a scripted sequence of results
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<String, FeedError>>>,
    calls: AtomicU32,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Result<String, FeedError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeProvider for ScriptedProvider {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(FeedError::ApiError {
                    status: 0,
                    message: "script exhausted".to_string(),
                })
            })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Backend provider that fails identically on every call
pub struct AlwaysFailingProvider {
    make_error: fn() -> FeedError,
    calls: AtomicU32,
}

impl AlwaysFailingProvider {
    pub fn new(make_error: fn() -> FeedError) -> Self {
        Self {
            make_error,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeProvider for AlwaysFailingProvider {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.make_error)())
    }

    fn name(&self) -> &'static str {
        "always-failing"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// A news payload with one good record, one blocklisted, one short URL
pub fn mixed_news_payload() -> String {
    r#"[
        {
            "title": "Right to Privacy upheld",
            "summary": "Nine-judge bench affirms privacy as a fundamental right",
            "sourceUrl": "https://indiankanoon.org/doc/127517806/"
        },
        {
            "title": "High Court ruling on bail",
            "summary": "Detailed coverage of the bail order",
            "sourceUrl": "https://www.livelaw.in/high-court-bail-order"
        },
        {
            "title": "Tribunal reform update",
            "summary": "New appointments notified",
            "sourceUrl": "http://x.co"
        }
    ]"#
    .to_string()
}

/// A news payload with a single clean record
pub fn clean_news_payload(title: &str) -> String {
    format!(
        r#"[{{"title":"{}","summary":"A clean record","sourceUrl":"https://indiankanoon.org/doc/127517806/"}}]"#,
        title
    )
}
