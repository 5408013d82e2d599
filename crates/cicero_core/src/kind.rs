//! Request kind discrimination.

use serde::{Deserialize, Serialize};

/// What kind of response the caller is asking for.
///
/// The kind selects the prompt template and the primary model candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// Plain text generation, prompt passed through unchanged (default).
    #[default]
    Text,
    /// Code generation with an instruction template.
    Code,
    /// Search-style answer with a structured-answer template.
    Search,
    /// Image analysis against the vision model.
    Image,
}

impl RequestKind {
    /// Stable lowercase name, matching the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Text => "text",
            RequestKind::Code => "code",
            RequestKind::Search => "search",
            RequestKind::Image => "image",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
