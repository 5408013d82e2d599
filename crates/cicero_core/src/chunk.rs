//! Progressive delivery events.

use serde::{Deserialize, Serialize};

/// One event in a simulated streaming sequence.
///
/// A sequence is ordered, finite, and non-restartable: one `Start`, then
/// one `Chunk` per word with cumulative content and strictly increasing
/// progress ending at 1.0, then one `Complete`. A failure before `Start`
/// produces a single `Error` event instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChunkEvent {
    /// Generation succeeded; chunks follow.
    Start,
    /// One more word of the response.
    Chunk {
        /// Cumulative partial text
        content: String,
        /// Fraction of words delivered so far, in (0, 1]
        progress: f64,
    },
    /// Terminal event carrying the full response.
    Complete {
        /// Full response text
        content: String,
    },
    /// Terminal event when generation failed.
    Error {
        /// Failure description
        message: String,
    },
}

impl ChunkEvent {
    /// True for the terminal events of a sequence.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChunkEvent::Complete { .. } | ChunkEvent::Error { .. })
    }
}
