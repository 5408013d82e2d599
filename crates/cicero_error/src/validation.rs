//! Request validation error types.

/// Validation error for malformed client requests.
///
/// Raised before any backend call is made.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Description of the missing or malformed field
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use cicero_error::ValidationError;
    ///
    /// let err = ValidationError::new("Prompt is required");
    /// assert!(err.message.contains("Prompt"));
    /// ```
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

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Validation Error: {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for ValidationError {}
