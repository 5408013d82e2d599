//! Search backend error types.
//!
//! Search failures never propagate to callers; the adapter degrades to an
//! empty result set. This type exists for logging inside the adapter.

/// Search error with source location.
#[derive(Debug, Clone)]
pub struct SearchError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl SearchError {
    /// Create a new SearchError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Search Error: {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for SearchError {}
