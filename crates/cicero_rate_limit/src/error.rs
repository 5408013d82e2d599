//! Error types for rate limiting operations.

/// Error kinds for rate limiting operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RateLimitErrorKind {
    /// Request ceiling reached for the current window.
    #[display(
        "Rate limit exceeded for {client}: {max_requests} requests per {window_secs}s, retry in {retry_after_secs}s"
    )]
    LimitExceeded {
        /// Client key that hit the ceiling
        client: String,
        /// Configured request ceiling
        max_requests: u32,
        /// Window length in seconds
        window_secs: u64,
        /// Seconds until the window resets
        retry_after_secs: u64,
    },
}

/// Rate limiting error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Rate Limit Error: {} at line {} in {}", kind, line, file)]
pub struct RateLimitError {
    kind: RateLimitErrorKind,
    line: u32,
    file: &'static str,
}

impl RateLimitError {
    /// Create a new rate limiting error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RateLimitErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RateLimitErrorKind {
        &self.kind
    }

    /// Seconds until the client may retry.
    pub fn retry_after_secs(&self) -> u64 {
        match &self.kind {
            RateLimitErrorKind::LimitExceeded {
                retry_after_secs, ..
            } => *retry_after_secs,
        }
    }
}
