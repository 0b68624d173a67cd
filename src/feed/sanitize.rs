// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Batch sanitization for generated content records
//!
//! Generative backends hallucinate: dead links, error-page titles, paywalled
//! sources, truncated or placeholder URLs. This module drops such records
//! wholesale. Records are never repaired or fabricated; a batch passes
//! through as an accept/reject filter with order preserved.

use regex::Regex;
use tracing::debug;
use url::Url;

/// Narrow capability interface the filter needs from a record
///
/// Each concrete record variant exposes its text-bearing and URL-bearing
/// fields; the filter never probes fields by name.
pub trait Reviewable {
    /// Text-bearing fields (title/name/case-name, summary)
    fn text_parts(&self) -> Vec<&str>;
    /// Populated URL-bearing fields
    fn urls(&self) -> Vec<&str>;
}

/// Text fragments that mark a record as scraped from an error page
const ERROR_PAGE_PATTERNS: &[&str] = &[
    "404",
    "page not found",
    "oops",
    "error 404",
    "not found",
    "access denied",
    "maintenance",
    "forbidden",
];

/// Paywalled or unreliable legal sources, dropped regardless of content
const DOMAIN_BLOCKLIST: &[&str] = &[
    "livelaw.in",
    "barandbench.com",
    "scconline.com",
    "manupatra.com",
    "taxmann.com",
    "westlaw.com",
    "lexisnexis.com",
];

/// Markers of a URL truncated by the model ("..." or the mis-encoded ellipsis)
const TRUNCATION_MARKERS: &[&str] = &["...", "\u{00e2}\u{20ac}\u{00a6}"];

/// Markers of a fabricated placeholder URL
const PLACEHOLDER_MARKERS: &[&str] = &["example.com", "placeholder"];

/// Minimum plausible length for a generated URL
const MIN_URL_LEN: usize = 15;

/// Stable accept/reject filter over a batch of generated records
pub struct RecordFilter {
    error_patterns: Vec<Regex>,
}

impl RecordFilter {
    /// Create a filter with the error-page patterns compiled
    pub fn new() -> Self {
        let error_patterns = ERROR_PAGE_PATTERNS
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect();

        Self { error_patterns }
    }

    /// Drop records that look like dead links, error pages, or blocklisted
    /// sources
    ///
    /// Pure and stable: surviving records keep their order and are returned
    /// unchanged. Applying the filter twice yields the same batch.
    pub fn clean<T: Reviewable>(&self, records: Vec<T>) -> Vec<T> {
        let before = records.len();
        let kept: Vec<T> = records
            .into_iter()
            .filter(|r| self.is_presentable(r))
            .collect();

        if kept.len() < before {
            debug!("Dropped {} of {} records", before - kept.len(), before);
        }

        kept
    }

    /// Whether a single record survives every rejection rule
    pub fn is_presentable<T: Reviewable>(&self, record: &T) -> bool {
        let text = record.text_parts().join(" ").to_lowercase();
        if self.error_patterns.iter().any(|p| p.is_match(&text)) {
            return false;
        }

        let urls = record.urls();
        if urls.is_empty() {
            return false;
        }

        urls.iter().all(|u| Self::is_acceptable_url(u))
    }

    /// URL validity and blocklist checks
    fn is_acceptable_url(url: &str) -> bool {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return false;
        }
        if url.len() < MIN_URL_LEN {
            return false;
        }
        if TRUNCATION_MARKERS.iter().any(|m| url.contains(m)) {
            return false;
        }

        let lower = url.to_lowercase();
        if PLACEHOLDER_MARKERS.iter().any(|m| lower.contains(m)) {
            return false;
        }

        match Url::parse(url) {
            Ok(parsed) => match parsed.host_str() {
                Some(host) => !Self::is_blocklisted(host),
                None => false,
            },
            Err(_) => false,
        }
    }

    /// Exact or subdomain match against the domain blocklist
    fn is_blocklisted(host: &str) -> bool {
        let host = host.to_lowercase();
        DOMAIN_BLOCKLIST
            .iter()
            .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
    }
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self::new()
    }
}
