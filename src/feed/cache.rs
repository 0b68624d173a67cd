// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! TTL-based caching of sanitized batch payloads

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// TTL-based cache for fetched batches
///
/// Stores the sanitized batch as its serialized JSON payload so one cache
/// serves every record shape. In-memory only; nothing survives the process.
pub struct FeedCache {
    cache: RwLock<HashMap<String, CachedEntry>>,
    ttl: Duration,
    max_entries: usize,
}

struct CachedEntry {
    payload: String,
    provider: String,
    inserted_at: Instant,
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct FeedCacheStats {
    /// Total entries in cache
    pub total: usize,
    /// Expired entries (not yet evicted)
    pub expired: usize,
    /// Maximum cache capacity
    pub max: usize,
}

impl FeedCache {
    /// Create a new cache
    ///
    /// # Arguments
    /// * `ttl_secs` - Time-to-live for cache entries in seconds
    /// * `max_entries` - Maximum number of entries to store
    pub fn new(ttl_secs: u64, max_entries: usize) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_secs),
            max_entries,
        }
    }

    /// Get a cached payload and the provider that produced it
    ///
    /// Returns None if not found or expired
    pub fn get(&self, key: &str) -> Option<(String, String)> {
        let cache = self.cache.read().ok()?;
        let entry = cache.get(key)?;

        if entry.inserted_at.elapsed() > self.ttl {
            return None; // Expired
        }

        Some((entry.payload.clone(), entry.provider.clone()))
    }

    /// Insert a serialized batch payload
    pub fn insert(&self, key: &str, payload: String, provider: &str) {
        let mut cache = match self.cache.write() {
            Ok(c) => c,
            Err(_) => return,
        };

        // Evict oldest if at capacity
        if cache.len() >= self.max_entries {
            Self::evict_oldest(&mut cache);
        }

        cache.insert(
            key.to_string(),
            CachedEntry {
                payload,
                provider: provider.to_string(),
                inserted_at: Instant::now(),
            },
        );
    }

    /// Clear all cache entries
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> FeedCacheStats {
        let cache = match self.cache.read() {
            Ok(c) => c,
            Err(_) => {
                return FeedCacheStats {
                    total: 0,
                    expired: 0,
                    max: self.max_entries,
                }
            }
        };

        let total = cache.len();
        let expired = cache
            .values()
            .filter(|e| e.inserted_at.elapsed() > self.ttl)
            .count();

        FeedCacheStats {
            total,
            expired,
            max: self.max_entries,
        }
    }

    /// Remove expired entries
    pub fn cleanup_expired(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.retain(|_, entry| entry.inserted_at.elapsed() <= self.ttl);
        }
    }

    fn evict_oldest(cache: &mut HashMap<String, CachedEntry>) {
        if let Some(oldest_key) = cache
            .iter()
            .min_by_key(|(_, v)| v.inserted_at)
            .map(|(k, _)| k.clone())
        {
            cache.remove(&oldest_key);
        }
    }
}
