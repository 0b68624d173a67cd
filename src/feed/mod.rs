// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Resilient generative content feeds
//!
//! Fetches structured legal content (news, articles, judgments, statutes,
//! jurisdiction feeds) from a generative backend, providing:
//! - Bounded exponential-backoff retry around every backend call
//! - Batch sanitization that drops dead-link and hallucinated records
//! - TTL-based batch caching
//! - Local rate limiting
//! - Graceful degradation: the fetch family never errors past the service

pub mod cache;
pub mod config;
pub mod gemini;
pub mod prompts;
pub mod provider;
pub mod rate_limiter;
pub mod retry;
pub mod sanitize;
pub mod schema;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::FeedConfig;
pub use provider::{GenerationRequest, GenerativeProvider};
pub use retry::{with_retry, RetryPolicy};
pub use sanitize::{RecordFilter, Reviewable};
pub use service::FeedService;
pub use types::{
    Article, ContentKind, FeedBatch, FeedError, Judgment, NewsItem, Statute,
};
