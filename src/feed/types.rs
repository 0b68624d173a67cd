// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for generative content feeds

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sanitize::Reviewable;

/// The content families served by the feed pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    /// Recent legal news items
    News,
    /// Commentary and analysis articles
    Articles,
    /// Court judgments
    Judgments,
    /// Statutes and enacted legislation
    Statutes,
    /// News scoped to a single jurisdiction
    JurisdictionFeed,
}

impl ContentKind {
    /// Stable name used in cache keys and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Articles => "articles",
            Self::Judgments => "judgments",
            Self::Statutes => "statutes",
            Self::JurisdictionFeed => "jurisdiction-feed",
        }
    }
}

/// A single legal news item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Headline of the news item
    pub title: String,
    /// Short narrative summary
    pub summary: String,
    /// Primary source URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Secondary coverage URL if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_url: Option<String>,
    /// Published date if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

/// A commentary or analysis article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Title of the article
    pub title: String,
    /// Abstract or summary
    pub summary: String,
    /// Author if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Primary source URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Alternate publication URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_url: Option<String>,
}

/// A court judgment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judgment {
    /// Case name (e.g. "K.S. Puttaswamy v. Union of India")
    pub case_name: String,
    /// Summary of the holding
    pub summary: String,
    /// Deciding court if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    /// Decision date if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_on: Option<String>,
    /// URL of the judgment text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Direct PDF download URL if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

/// A statute or enacted piece of legislation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statute {
    /// Short title of the statute
    pub name: String,
    /// Summary of scope and effect
    pub summary: String,
    /// Enacting jurisdiction if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    /// URL of the bare act text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Official download URL if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// Response from one fetch operation
///
/// Batches are self-contained and independently rendered; no deduplication
/// is performed across batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedBatch<T> {
    /// Content family this batch belongs to
    pub kind: ContentKind,
    /// Surviving records, in the order the backend returned them
    pub records: Vec<T>,
    /// Time taken for the fetch in milliseconds
    pub fetch_time_ms: u64,
    /// Backend that produced the records
    pub provider: String,
    /// Whether the batch was served from cache
    pub cached: bool,
    /// Number of records returned
    pub record_count: usize,
}

impl<T> FeedBatch<T> {
    /// The degraded result returned when a fetch cannot be recovered
    pub fn empty(kind: ContentKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            fetch_time_ms: 0,
            provider: "none".to_string(),
            cached: false,
            record_count: 0,
        }
    }
}

/// Errors that can occur in the content pipeline
#[derive(Debug, Error)]
pub enum FeedError {
    /// Rate limited by the generative backend
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Backend quota exhausted
    #[error("Backend quota exhausted")]
    QuotaExhausted,

    /// API error from the generative backend
    #[error("Backend API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Request timed out
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// No API key configured for the provider
    #[error("No API key configured for {provider}")]
    NoApiKey {
        /// Name of the provider missing an API key
        provider: String,
    },

    /// Response payload did not conform to the requested schema
    #[error("Failed to parse backend payload: {reason}")]
    ParseError {
        /// Reason the payload is unusable
        reason: String,
    },

    /// Invalid request from the caller
    #[error("Invalid request: {reason}")]
    InvalidRequest {
        /// Reason the request is invalid
        reason: String,
    },

    /// No usable backend provider
    #[error("Provider unavailable: {provider}")]
    ProviderUnavailable {
        /// Name of the unavailable provider
        provider: String,
    },

    /// Content fetching is disabled on this deployment
    #[error("Content fetching disabled")]
    FeedDisabled,
}

impl FeedError {
    /// Whether this failure class is worth retrying
    ///
    /// Transient failures are rate-limit or quota signals and server-side
    /// faults (5xx). Everything else is terminal and returned to the caller
    /// after a single attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::QuotaExhausted => true,
            Self::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl Reviewable for NewsItem {
    fn text_parts(&self) -> Vec<&str> {
        vec![&self.title, &self.summary]
    }

    fn urls(&self) -> Vec<&str> {
        populated_urls([self.source_url.as_deref(), self.secondary_url.as_deref()])
    }
}

impl Reviewable for Article {
    fn text_parts(&self) -> Vec<&str> {
        vec![&self.title, &self.summary]
    }

    fn urls(&self) -> Vec<&str> {
        populated_urls([self.source_url.as_deref(), self.alternate_url.as_deref()])
    }
}

impl Reviewable for Judgment {
    fn text_parts(&self) -> Vec<&str> {
        vec![&self.case_name, &self.summary]
    }

    fn urls(&self) -> Vec<&str> {
        populated_urls([self.source_url.as_deref(), self.pdf_url.as_deref()])
    }
}

impl Reviewable for Statute {
    fn text_parts(&self) -> Vec<&str> {
        vec![&self.name, &self.summary]
    }

    fn urls(&self) -> Vec<&str> {
        populated_urls([self.source_url.as_deref(), self.download_url.as_deref()])
    }
}

/// Keep only URL fields that are actually populated
fn populated_urls<const N: usize>(fields: [Option<&str>; N]) -> Vec<&str> {
    fields
        .into_iter()
        .flatten()
        .filter(|u| !u.trim().is_empty())
        .collect()
}
