// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Feed orchestration
//!
//! Composes prompt building, the retrying backend call, payload parsing,
//! sanitization and caching. The public fetch family always resolves: any
//! unrecovered failure degrades to an empty batch here, in one place, so the
//! rendering layer never sees an error from a batch fetch.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::cache::{FeedCache, FeedCacheStats};
use super::config::FeedConfig;
use super::gemini::GeminiProvider;
use super::prompts::batch_instructions;
use super::provider::{GenerationRequest, GenerativeProvider};
use super::rate_limiter::FeedRateLimiter;
use super::retry::with_retry;
use super::sanitize::{RecordFilter, Reviewable};
use super::schema::batch_schema;
use super::types::{Article, ContentKind, FeedBatch, FeedError, Judgment, NewsItem, Statute};

/// Maximum cached batches before eviction kicks in
const MAX_CACHE_ENTRIES: usize = 500;

/// Main feed service orchestrating the fetch pipeline
pub struct FeedService {
    provider: Arc<dyn GenerativeProvider>,
    filter: RecordFilter,
    cache: FeedCache,
    rate_limiter: FeedRateLimiter,
    config: FeedConfig,
}

impl FeedService {
    /// Create a feed service backed by the configured Gemini provider
    pub fn new(config: FeedConfig) -> Self {
        let provider = Arc::new(GeminiProvider::new(
            config.provider.gemini_api_key.clone().unwrap_or_default(),
            config.provider.model.clone(),
            config.request_timeout_ms,
        ));

        Self::with_provider(config, provider)
    }

    /// Create a feed service with an explicit backend provider
    pub fn with_provider(config: FeedConfig, provider: Arc<dyn GenerativeProvider>) -> Self {
        let cache = FeedCache::new(config.cache_ttl_secs, MAX_CACHE_ENTRIES);
        let rate_limiter = FeedRateLimiter::new(config.rate_limit_per_minute);

        Self {
            provider,
            filter: RecordFilter::new(),
            cache,
            rate_limiter,
            config,
        }
    }

    /// Fetch a page of legal news
    pub async fn fetch_news(&self, page: u32) -> FeedBatch<NewsItem> {
        self.fetch_or_empty(ContentKind::News, None, page).await
    }

    /// Fetch a page of articles and commentary
    pub async fn fetch_articles(&self, page: u32) -> FeedBatch<Article> {
        self.fetch_or_empty(ContentKind::Articles, None, page).await
    }

    /// Fetch a page of recent judgments
    pub async fn fetch_judgments(&self, page: u32) -> FeedBatch<Judgment> {
        self.fetch_or_empty(ContentKind::Judgments, None, page)
            .await
    }

    /// Fetch a page of statutes
    pub async fn fetch_statutes(&self, page: u32) -> FeedBatch<Statute> {
        self.fetch_or_empty(ContentKind::Statutes, None, page).await
    }

    /// Fetch a page of news scoped to one jurisdiction
    pub async fn fetch_jurisdiction_feed(
        &self,
        jurisdiction: &str,
        page: u32,
    ) -> FeedBatch<NewsItem> {
        self.fetch_or_empty(ContentKind::JurisdictionFeed, Some(jurisdiction), page)
            .await
    }

    /// Fetch several jurisdiction feeds in parallel
    pub async fn fetch_jurisdiction_feeds(
        &self,
        jurisdictions: &[String],
        page: u32,
    ) -> Vec<FeedBatch<NewsItem>> {
        let futures: Vec<_> = jurisdictions
            .iter()
            .map(|j| self.fetch_jurisdiction_feed(j, page))
            .collect();

        futures::future::join_all(futures).await
    }

    /// The single degradation boundary for the fetch family
    ///
    /// Terminal and retry-exhausted failures are logged and converted to an
    /// empty batch; nothing propagates to the caller.
    async fn fetch_or_empty<T>(
        &self,
        kind: ContentKind,
        query: Option<&str>,
        page: u32,
    ) -> FeedBatch<T>
    where
        T: Reviewable + Serialize + DeserializeOwned,
    {
        match self.fetch_batch(kind, query, page).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!(
                    "{} fetch (page {}) degraded to empty batch: {}",
                    kind.as_str(),
                    page,
                    e
                );
                FeedBatch::empty(kind)
            }
        }
    }

    /// The fallible pipeline: cache, rate limit, retrying generate, parse,
    /// sanitize, cache insert
    async fn fetch_batch<T>(
        &self,
        kind: ContentKind,
        query: Option<&str>,
        page: u32,
    ) -> Result<FeedBatch<T>, FeedError>
    where
        T: Reviewable + Serialize + DeserializeOwned,
    {
        if !self.config.enabled {
            return Err(FeedError::FeedDisabled);
        }

        if !self.provider.is_available() {
            return Err(FeedError::ProviderUnavailable {
                provider: self.provider.name().to_string(),
            });
        }

        let key = Self::cache_key(kind, query, page);

        if let Some((payload, provider)) = self.cache.get(&key) {
            debug!("Cache hit for {}", key);
            let records: Vec<T> =
                serde_json::from_str(&payload).map_err(|e| FeedError::ParseError {
                    reason: format!("corrupt cache entry: {}", e),
                })?;
            return Ok(FeedBatch {
                kind,
                record_count: records.len(),
                records,
                fetch_time_ms: 0,
                provider,
                cached: true,
            });
        }

        self.rate_limiter.check()?;

        let start = Instant::now();
        let request = GenerationRequest::new(
            batch_instructions(kind, query, page, self.config.records_per_batch),
            batch_schema(kind),
        );

        let payload = with_retry(&self.config.retry, || self.provider.generate(&request)).await?;

        let records: Vec<T> = serde_json::from_str(&payload).map_err(|e| FeedError::ParseError {
            reason: format!("payload does not match schema: {}", e),
        })?;

        let received = records.len();
        let records = self.filter.clean(records);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let serialized = serde_json::to_string(&records).map_err(|e| FeedError::ParseError {
            reason: e.to_string(),
        })?;
        self.cache.insert(&key, serialized, self.provider.name());

        info!(
            "Fetched {}: kept {} of {} records in {}ms",
            kind.as_str(),
            records.len(),
            received,
            elapsed_ms
        );

        Ok(FeedBatch {
            kind,
            record_count: records.len(),
            records,
            fetch_time_ms: elapsed_ms,
            provider: self.provider.name().to_string(),
            cached: false,
        })
    }

    fn cache_key(kind: ContentKind, query: Option<&str>, page: u32) -> String {
        format!(
            "{}::{}::{}",
            kind.as_str(),
            query.unwrap_or("").trim().to_lowercase(),
            page
        )
    }

    /// Check if content fetching is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> FeedCacheStats {
        self.cache.stats()
    }

    /// Clear the batch cache
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
