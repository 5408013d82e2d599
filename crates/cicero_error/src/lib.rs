//! Error types for the Cicero assistant backend.
//!
//! Each collaborator domain gets its own error type with source-location
//! capture; the aggregate [`CiceroError`] carries kind discrimination so
//! the HTTP layer can map failures to transport status codes without
//! inspecting message strings.

mod auth;
mod config;
mod generation;
mod search;
mod storage;
mod validation;

pub use auth::AuthError;
pub use config::ConfigError;
pub use generation::{GenerationError, GenerationErrorKind};
pub use search::SearchError;
pub use storage::{StorageError, StorageErrorKind};
pub use validation::ValidationError;

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum CiceroErrorKind {
    /// Malformed client request
    Validation(ValidationError),
    /// Identity verification failure
    Auth(AuthError),
    /// Generation backend failure
    Generation(GenerationError),
    /// Document store failure
    Storage(StorageError),
    /// Search backend failure
    Search(SearchError),
    /// Configuration error
    Config(ConfigError),
}

impl std::fmt::Display for CiceroErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CiceroErrorKind::Validation(e) => write!(f, "{}", e),
            CiceroErrorKind::Auth(e) => write!(f, "{}", e),
            CiceroErrorKind::Generation(e) => write!(f, "{}", e),
            CiceroErrorKind::Storage(e) => write!(f, "{}", e),
            CiceroErrorKind::Search(e) => write!(f, "{}", e),
            CiceroErrorKind::Config(e) => write!(f, "{}", e),
        }
    }
}

/// Cicero error with kind discrimination.
#[derive(Debug)]
pub struct CiceroError(Box<CiceroErrorKind>);

impl CiceroError {
    /// Create a new error from a kind.
    pub fn new(kind: CiceroErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CiceroErrorKind {
        &self.0
    }
}

impl std::fmt::Display for CiceroError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cicero Error: {}", self.0)
    }
}

impl std::error::Error for CiceroError {}

// Generic From implementation for any type that converts to CiceroErrorKind
impl<T> From<T> for CiceroError
where
    T: Into<CiceroErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Cicero operations.
pub type CiceroResult<T> = std::result::Result<T, CiceroError>;
