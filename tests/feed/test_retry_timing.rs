// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Retry invoker timing and attempt-count properties

use lexfeed::feed::retry::with_retry;
use lexfeed::{FeedError, RetryPolicy};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

fn server_fault() -> FeedError {
    FeedError::ApiError {
        status: 502,
        message: "bad gateway".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_always_transient_calls_exactly_max_attempts() {
    let policy = RetryPolicy {
        max_attempts: 5,
        base_delay_ms: 1000,
    };
    let calls = AtomicU32::new(0);

    let result: Result<(), _> = with_retry(&policy, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(server_fault()) }
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_final_error_is_last_attempt_error() {
    let policy = RetryPolicy {
        max_attempts: 3,
        base_delay_ms: 1000,
    };
    let calls = AtomicU32::new(0);

    // Each attempt fails with a distinct status so the propagated error
    // identifies the attempt it came from
    let result: Result<(), _> = with_retry(&policy, || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            Err(FeedError::ApiError {
                status: 500 + n as u16,
                message: format!("attempt {}", n),
            })
        }
    })
    .await;

    match result {
        Err(FeedError::ApiError { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "attempt 2");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_backoff_delay_sequence() {
    // base 1000ms, 4 attempts: waits of 1000, 2000, 4000 before
    // attempts 2, 3, 4
    let policy = RetryPolicy {
        max_attempts: 4,
        base_delay_ms: 1000,
    };
    let attempt_times = std::sync::Mutex::new(Vec::new());
    let start = tokio::time::Instant::now();

    let result: Result<(), _> = with_retry(&policy, || {
        attempt_times.lock().unwrap().push(start.elapsed());
        async { Err(server_fault()) }
    })
    .await;

    assert!(result.is_err());
    let times = attempt_times.into_inner().unwrap();
    assert_eq!(
        times,
        vec![
            Duration::ZERO,
            Duration::from_millis(1000),
            Duration::from_millis(3000),
            Duration::from_millis(7000),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_terminal_failure_single_call_no_wait() {
    let policy = RetryPolicy {
        max_attempts: 5,
        base_delay_ms: 1000,
    };
    let calls = AtomicU32::new(0);
    let start = tokio::time::Instant::now();

    let result: Result<(), _> = with_retry(&policy, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async {
            Err(FeedError::InvalidRequest {
                reason: "malformed".to_string(),
            })
        }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_total_backoff_bounded() {
    // Total added wall-clock stays under base * (2^attempts - 1)
    let policy = RetryPolicy {
        max_attempts: 3,
        base_delay_ms: 500,
    };
    let start = tokio::time::Instant::now();

    let result: Result<(), _> = with_retry(&policy, || async { Err(server_fault()) }).await;

    assert!(result.is_err());
    assert!(start.elapsed() <= Duration::from_millis(500 * (2u64.pow(3) - 1)));
}

#[tokio::test(start_paused = true)]
async fn test_success_stops_retrying() {
    let policy = RetryPolicy {
        max_attempts: 5,
        base_delay_ms: 1000,
    };
    let calls = AtomicU32::new(0);

    let result = with_retry(&policy, || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n == 0 {
                Err(FeedError::RateLimited {
                    retry_after_secs: 60,
                })
            } else {
                Ok(n)
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
