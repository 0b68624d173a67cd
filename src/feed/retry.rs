// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bounded exponential-backoff retry for generative backend calls

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::FeedError;

/// Retry policy for backend invocations
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (a zero value behaves as one attempt)
    pub max_attempts: u32,
    /// Base backoff delay in milliseconds
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

impl RetryPolicy {
    /// Backoff delay after the failed attempt with the given 0-based index
    ///
    /// Delays double per attempt: base, 2x base, 4x base, ...
    pub fn delay_after(&self, attempt_index: u32) -> Duration {
        Duration::from_millis(self.base_delay_ms * 2u64.pow(attempt_index))
    }
}

/// Invoke `op`, retrying transient failures with exponential backoff
///
/// Only failures classified transient by [`FeedError::is_transient`] are
/// retried. Terminal failures, and the last failure once attempts are
/// exhausted, are returned to the caller unchanged.
///
/// The operation is invoked at most `policy.max_attempts` times.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, FeedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FeedError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        match op().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("Backend call succeeded on attempt {}", attempt + 1);
                }
                return Ok(value);
            }
            Err(e) => {
                let failed_attempt = attempt;
                attempt += 1;

                if !e.is_transient() || attempt >= max_attempts {
                    return Err(e);
                }

                let delay = policy.delay_after(failed_attempt);
                warn!(
                    "Backend call failed on attempt {}/{}: {}, retrying in {}ms",
                    attempt,
                    max_attempts,
                    e,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
