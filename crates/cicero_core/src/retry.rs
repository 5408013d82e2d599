//! Retry policy for generation attempts.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounded exponential backoff policy.
///
/// One attempt is a full pass over the candidate list; the policy bounds
/// how many attempts are made and how long to wait between them. The
/// jitter term is a deterministic function of the attempt index rather
/// than a random draw, so delays are exactly reproducible in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct RetryPolicy {
    /// Maximum number of attempts, at least 1
    max_attempts: u32,
    /// Base delay before the second attempt
    base_delay: Duration,
    /// Upper bound on the exponential term
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicyBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == Some(0) {
            return Err("max_attempts must be at least 1".to_string());
        }
        if let (Some(base), Some(max)) = (self.base_delay, self.max_delay) {
            if base > max {
                return Err("base_delay must not exceed max_delay".to_string());
            }
        }
        Ok(())
    }
}

/// Deterministic per-attempt jitter increment.
const JITTER_STEP: Duration = Duration::from_millis(100);

impl RetryPolicy {
    /// Delay to sleep before attempt `attempt` (1-based).
    ///
    /// For attempt k > 1 this is `min(base * 2^(k-2), max) + 100ms * (k-1)`.
    /// Attempt 1 never waits.
    pub fn backoff_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let exponent = attempt - 2;
        let exponential = self
            .base_delay
            .checked_mul(1u32 << exponent.min(31))
            .unwrap_or(self.max_delay);
        exponential.min(self.max_delay) + JITTER_STEP * (attempt - 1)
    }
}
