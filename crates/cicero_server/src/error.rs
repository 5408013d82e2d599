//! HTTP error responses.
//!
//! Failures are mapped to status codes by error kind rather than by
//! message inspection. The body shape is `{"detail": "..."}` on every
//! error path.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cicero_error::{
    AuthError, CiceroError, CiceroErrorKind, GenerationErrorKind, StorageError, StorageErrorKind,
    ValidationError,
};
use cicero_rate_limit::RateLimitError;
use serde_json::json;

/// An error ready to leave the service as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The detail message sent to the client.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CiceroError> for ApiError {
    fn from(err: CiceroError) -> Self {
        let message = err.kind().to_string();
        let status = match err.kind() {
            CiceroErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
            CiceroErrorKind::Auth(_) => StatusCode::UNAUTHORIZED,
            CiceroErrorKind::Generation(e) => match e.kind() {
                GenerationErrorKind::MissingApiKey | GenerationErrorKind::Authentication(_) => {
                    StatusCode::UNAUTHORIZED
                }
                GenerationErrorKind::Quota(_) => StatusCode::TOO_MANY_REQUESTS,
                GenerationErrorKind::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            CiceroErrorKind::Storage(e) => match e.kind() {
                StorageErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
                StorageErrorKind::AccessDenied(_) => StatusCode::FORBIDDEN,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            CiceroErrorKind::Search(_) | CiceroErrorKind::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self { status, message }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.message.clone())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::from(CiceroError::from(err))
    }
}

impl From<AuthError> for ApiError {
    fn from(_: AuthError) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "Invalid authentication credentials",
        )
    }
}

impl From<RateLimitError> for ApiError {
    fn from(err: RateLimitError) -> Self {
        Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            format!(
                "Rate limit exceeded, retry after {} seconds",
                err.retry_after_secs()
            ),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.message }))).into_response()
    }
}
