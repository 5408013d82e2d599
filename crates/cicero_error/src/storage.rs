//! Document store error types.

/// Document store error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageErrorKind {
    /// Requested document does not exist
    NotFound(String),
    /// Document is owned by a different user
    AccessDenied(String),
    /// Request to the store failed
    Request(String),
    /// Stored document could not be decoded
    InvalidDocument(String),
}

impl std::fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageErrorKind::NotFound(id) => write!(f, "Document not found: {}", id),
            StorageErrorKind::AccessDenied(id) => {
                write!(f, "Access denied for document: {}", id)
            }
            StorageErrorKind::Request(msg) => write!(f, "Store request failed: {}", msg),
            StorageErrorKind::InvalidDocument(msg) => {
                write!(f, "Invalid stored document: {}", msg)
            }
        }
    }
}

/// Storage error with source location tracking.
///
/// # Examples
///
/// ```
/// use cicero_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("abc".into()));
/// assert!(format!("{}", err).contains("abc"));
/// ```
#[derive(Debug, Clone)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new StorageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorageErrorKind {
        &self.kind
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Storage Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for StorageError {}
