//! Tests for the fixed-window client limiter.

use cicero_rate_limit::{ClientLimiter, RateLimitConfig, RateLimitErrorKind};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn ceiling_enforced_within_window() {
    let limiter = ClientLimiter::new(RateLimitConfig::new(3, Duration::from_secs(60)));

    for _ in 0..3 {
        assert!(limiter.try_acquire("10.0.0.1").is_ok());
    }
    let err = limiter.try_acquire("10.0.0.1").expect_err("over ceiling");
    match err.kind() {
        RateLimitErrorKind::LimitExceeded { max_requests, .. } => {
            assert_eq!(*max_requests, 3);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn clients_are_independent() {
    let limiter = ClientLimiter::new(RateLimitConfig::new(1, Duration::from_secs(60)));

    assert!(limiter.try_acquire("10.0.0.1").is_ok());
    assert!(limiter.try_acquire("10.0.0.2").is_ok());
    assert!(limiter.try_acquire("10.0.0.1").is_err());
}

#[tokio::test(start_paused = true)]
async fn window_resets_after_expiry() {
    let limiter = ClientLimiter::new(RateLimitConfig::new(1, Duration::from_secs(60)));

    assert!(limiter.try_acquire("10.0.0.1").is_ok());
    assert!(limiter.try_acquire("10.0.0.1").is_err());

    tokio::time::advance(Duration::from_secs(61)).await;
    assert!(limiter.try_acquire("10.0.0.1").is_ok());
}

#[tokio::test(start_paused = true)]
async fn retry_after_counts_down() {
    let limiter = ClientLimiter::new(RateLimitConfig::new(1, Duration::from_secs(60)));

    assert!(limiter.try_acquire("10.0.0.1").is_ok());
    tokio::time::advance(Duration::from_secs(20)).await;
    let err = limiter.try_acquire("10.0.0.1").expect_err("over ceiling");
    assert_eq!(err.retry_after_secs(), 40);
}

#[tokio::test(start_paused = true)]
async fn default_matches_ask_endpoint_ceiling() {
    let limiter = ClientLimiter::new(RateLimitConfig::default());
    assert_eq!(*limiter.config().max_requests(), 100);
    assert_eq!(*limiter.config().window(), Duration::from_secs(900));
}
