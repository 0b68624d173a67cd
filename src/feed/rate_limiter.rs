// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local rate limiting for generative backend requests

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

use super::types::FeedError;

/// Rate limiter applied before every backend invocation
pub struct FeedRateLimiter {
    limiter: Arc<GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    requests_per_minute: u32,
}

impl FeedRateLimiter {
    /// Create a new rate limiter
    ///
    /// A zero limit falls back to 30 requests per minute.
    pub fn new(requests_per_minute: u32) -> Self {
        let rpm = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::new(30).unwrap());
        let quota = Quota::per_minute(rpm);
        let limiter = Arc::new(GovRateLimiter::direct(quota));

        Self {
            limiter,
            requests_per_minute,
        }
    }

    /// Check if a request is allowed right now
    pub fn check(&self) -> Result<(), FeedError> {
        match self.limiter.check() {
            Ok(_) => Ok(()),
            Err(_) => Err(FeedError::RateLimited {
                retry_after_secs: 60,
            }),
        }
    }

    /// Get the configured requests per minute
    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }
}
