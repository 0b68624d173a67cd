// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the content pipeline

use std::env;

use super::retry::RetryPolicy;

/// Configuration for content fetching
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Whether content fetching is enabled
    pub enabled: bool,
    /// Provider-specific configuration
    pub provider: ProviderConfig,
    /// Cache TTL in seconds
    pub cache_ttl_secs: u64,
    /// Rate limit (backend requests per minute)
    pub rate_limit_per_minute: u32,
    /// Records requested per batch
    pub records_per_batch: usize,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Retry policy for backend invocations
    pub retry: RetryPolicy,
}

/// Provider-specific configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,
    /// Model identifier to request
    pub model: String,
}

impl FeedConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            // Fetching enabled by default; set FEED_ENABLED=false to disable
            enabled: env::var("FEED_ENABLED")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
            provider: ProviderConfig {
                gemini_api_key: env::var("GEMINI_API_KEY").ok(),
                model: env::var("FEED_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            },
            cache_ttl_secs: env::var("FEED_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1800),
            rate_limit_per_minute: env::var("FEED_RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            records_per_batch: env::var("FEED_RECORDS_PER_BATCH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),
            request_timeout_ms: env::var("FEED_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            retry: RetryPolicy {
                max_attempts: env::var("FEED_MAX_ATTEMPTS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3),
                base_delay_ms: env::var("FEED_RETRY_BASE_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1000),
            },
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.cache_ttl_secs == 0 {
            return Err("Cache TTL must be greater than 0".to_string());
        }
        if self.rate_limit_per_minute == 0 {
            return Err("Rate limit must be greater than 0".to_string());
        }
        if self.records_per_batch == 0 {
            return Err("Records per batch must be greater than 0".to_string());
        }
        if self.provider.model.is_empty() {
            return Err("Model must not be empty".to_string());
        }
        Ok(())
    }

    /// Check if a backend API key is configured
    pub fn has_api_key(&self) -> bool {
        self.provider
            .gemini_api_key
            .as_deref()
            .is_some_and(|k| !k.is_empty())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: ProviderConfig {
                gemini_api_key: None,
                model: "gemini-2.0-flash".to_string(),
            },
            cache_ttl_secs: 1800,
            rate_limit_per_minute: 30,
            records_per_batch: 8,
            request_timeout_ms: 30000,
            retry: RetryPolicy::default(),
        }
    }
}
