//! Fixed-window request limiting per client address.

use crate::{RateLimitError, RateLimitErrorKind};
use derive_getters::Getters;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Rate limit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    max_requests: u32,
    /// Window length
    window: Duration,
}

impl RateLimitConfig {
    /// Create a configuration.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }
}

impl Default for RateLimitConfig {
    /// 100 requests per 15 minutes, the ceiling on the primary ask endpoint.
    fn default() -> Self {
        Self::new(100, Duration::from_secs(15 * 60))
    }
}

/// Per-client window state.
#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started: Instant,
}

/// Fixed-window request limiter keyed by client address.
///
/// Windows reset lazily on access; entries whose window has long expired
/// are pruned opportunistically so the map does not grow with one entry
/// per client forever. Thread-safe; share via `Arc` across handlers.
#[derive(Debug)]
pub struct ClientLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, Window>>,
}

impl ClientLimiter {
    /// Creates a limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Gets the rate limit configuration.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Record one request for `client`, failing if the window is full.
    #[tracing::instrument(skip(self))]
    pub fn try_acquire(&self, client: &str) -> Result<(), RateLimitError> {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("limiter mutex poisoned");

        // Drop entries that have been idle past a full window.
        windows.retain(|_, w| now.duration_since(w.started) < self.config.window * 2);

        let window = windows.entry(client.to_string()).or_insert(Window {
            count: 0,
            started: now,
        });

        if now.duration_since(window.started) >= self.config.window {
            window.count = 0;
            window.started = now;
        }

        if window.count >= self.config.max_requests {
            let elapsed = now.duration_since(window.started);
            let retry_after = self.config.window.saturating_sub(elapsed);
            return Err(RateLimitError::new(RateLimitErrorKind::LimitExceeded {
                client: client.to_string(),
                max_requests: self.config.max_requests,
                window_secs: self.config.window.as_secs(),
                retry_after_secs: retry_after.as_secs(),
            }));
        }

        window.count += 1;
        debug!(
            client,
            count = window.count,
            max = self.config.max_requests,
            "Request admitted"
        );
        Ok(())
    }
}
