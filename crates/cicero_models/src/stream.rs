//! Simulated progressive delivery.
//!
//! The backend has no incremental generation endpoint, so the emitter
//! splits a completed response into word chunks with a fixed pacing delay.
//! This is an artificial pacing device, not token streaming; true
//! streaming would need incremental delivery from the backend.

use cicero_core::{ChunkEvent, GenerationOutcome};
use cicero_error::CiceroError;
use futures_util::Stream;
use std::future::Future;
use std::time::Duration;

/// Fixed delay between chunk emissions.
pub const CHUNK_DELAY: Duration = Duration::from_millis(50);

/// Turn a generation future into a finite event sequence.
///
/// On failure the sequence is a single [`ChunkEvent::Error`]. On success:
/// one `Start`, one `Chunk` per whitespace-delimited word carrying the
/// cumulative text and a progress fraction ending at exactly 1.0, then one
/// `Complete` with the full text. If the consumer drops the stream,
/// production stops at the next pacing delay with no further effects.
pub fn chunk_stream<F>(generation: F) -> impl Stream<Item = ChunkEvent>
where
    F: Future<Output = Result<GenerationOutcome, CiceroError>>,
{
    async_stream::stream! {
        let outcome = match generation.await {
            Ok(outcome) => outcome,
            Err(e) => {
                yield ChunkEvent::Error {
                    message: e.to_string(),
                };
                return;
            }
        };

        yield ChunkEvent::Start;

        let text = outcome.into_text();
        let words: Vec<&str> = text.split_whitespace().collect();
        let total = words.len();
        let mut current = String::new();

        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(CHUNK_DELAY).await;
                current.push(' ');
            }
            current.push_str(word);
            yield ChunkEvent::Chunk {
                content: current.clone(),
                progress: (i + 1) as f64 / total as f64,
            };
        }

        yield ChunkEvent::Complete { content: text };
    }
}
