//! Generation backend error types.

/// Failure categories raised by generation backends.
///
/// The backend adapter maps transport status codes and API error payloads
/// into this closed set so that callers never inspect message strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenerationErrorKind {
    /// GEMINI_API_KEY not found in environment
    MissingApiKey,
    /// API credential rejected by the backend
    Authentication(String),
    /// Upstream quota or rate limit exceeded
    Quota(String),
    /// Requested model not found or retired
    ModelUnavailable(String),
    /// Backend returned a response with no usable text
    EmptyResponse,
    /// Response payload could not be interpreted
    InvalidResponse(String),
    /// HTTP error with status code and message
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Connection-level failure before a status was received
    Transport(String),
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationErrorKind::MissingApiKey => {
                write!(f, "GEMINI_API_KEY environment variable not set")
            }
            GenerationErrorKind::Authentication(msg) => {
                write!(f, "Authentication failed: {}", msg)
            }
            GenerationErrorKind::Quota(msg) => write!(f, "Quota exceeded: {}", msg),
            GenerationErrorKind::ModelUnavailable(model) => {
                write!(f, "Model not found: {}", model)
            }
            GenerationErrorKind::EmptyResponse => {
                write!(f, "Empty response from generation backend")
            }
            GenerationErrorKind::InvalidResponse(msg) => {
                write!(f, "Invalid response payload: {}", msg)
            }
            GenerationErrorKind::HttpError {
                status_code,
                message,
            } => write!(f, "HTTP {} error: {}", status_code, message),
            GenerationErrorKind::Transport(msg) => write!(f, "Transport error: {}", msg),
        }
    }
}

impl GenerationErrorKind {
    /// True when the error indicates the requested model itself is missing,
    /// which advances the candidate pointer instead of failing the attempt.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, GenerationErrorKind::ModelUnavailable(_))
    }

    /// Classify an HTTP status code from the generation backend.
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => GenerationErrorKind::Authentication(message),
            429 => GenerationErrorKind::Quota(message),
            404 => GenerationErrorKind::ModelUnavailable(message),
            _ => GenerationErrorKind::HttpError {
                status_code,
                message,
            },
        }
    }

    /// Classify an error payload by message content.
    ///
    /// Some backend failures arrive inside a 200 response body with only a
    /// free-form message; the substring table exists for exactly that case.
    /// Everything with a status code goes through [`from_status`].
    ///
    /// Any message mentioning the model ("The model is overloaded") counts
    /// as unavailable so the caller can advance to the next candidate.
    ///
    /// [`from_status`]: GenerationErrorKind::from_status
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("api key") || lower.contains("authentication") {
            GenerationErrorKind::Authentication(message)
        } else if lower.contains("quota") || lower.contains("limit") {
            GenerationErrorKind::Quota(message)
        } else if lower.contains("not found") || lower.contains("404") || lower.contains("model") {
            GenerationErrorKind::ModelUnavailable(message)
        } else {
            GenerationErrorKind::InvalidResponse(message)
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use cicero_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }

    /// True when the candidate loop should move to the next model.
    pub fn is_model_unavailable(&self) -> bool {
        self.kind.is_model_unavailable()
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generation Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for GenerationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            GenerationErrorKind::from_status(401, "bad key"),
            GenerationErrorKind::Authentication(_)
        ));
        assert!(matches!(
            GenerationErrorKind::from_status(429, "slow down"),
            GenerationErrorKind::Quota(_)
        ));
        assert!(matches!(
            GenerationErrorKind::from_status(404, "gemini-x"),
            GenerationErrorKind::ModelUnavailable(_)
        ));
        assert!(matches!(
            GenerationErrorKind::from_status(500, "boom"),
            GenerationErrorKind::HttpError {
                status_code: 500,
                ..
            }
        ));
    }

    #[test]
    fn message_classification() {
        assert!(matches!(
            GenerationErrorKind::from_message("invalid API key supplied"),
            GenerationErrorKind::Authentication(_)
        ));
        assert!(matches!(
            GenerationErrorKind::from_message("quota exhausted for project"),
            GenerationErrorKind::Quota(_)
        ));
        assert!(matches!(
            GenerationErrorKind::from_message("model was not found"),
            GenerationErrorKind::ModelUnavailable(_)
        ));
        assert!(matches!(
            GenerationErrorKind::from_message("something odd"),
            GenerationErrorKind::InvalidResponse(_)
        ));
    }

    #[test]
    fn overloaded_model_counts_as_unavailable() {
        let kind = GenerationErrorKind::from_message("The model is overloaded");
        assert!(matches!(kind, GenerationErrorKind::ModelUnavailable(_)));
        assert!(kind.is_model_unavailable());
    }
}
