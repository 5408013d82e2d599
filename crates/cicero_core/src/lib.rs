//! Core data types for the Cicero assistant backend.
//!
//! This crate provides the foundation data types used across all Cicero
//! crates: requests, model candidates, retry policy, streaming events,
//! history records, and user types.

mod chunk;
mod history;
mod kind;
mod models;
mod outcome;
mod params;
pub mod prompt;
mod request;
mod retry;
mod search;
mod user;

pub use chunk::ChunkEvent;
pub use history::{HistoryRecord, HistoryRecordBuilder};
pub use kind::RequestKind;
pub use models::{ModelCandidates, ModelCandidatesBuilder};
pub use outcome::GenerationOutcome;
pub use params::{GenerationParams, GenerationParamsBuilder, SafetySetting};
pub use request::{GenerationRequest, GenerationRequestBuilder, ImagePayload, ImagePayloadBuilder};
pub use retry::{RetryPolicy, RetryPolicyBuilder};
pub use search::{SearchOutcome, SearchResult, SearchResultBuilder};
pub use user::{
    ProfileUpdate, UserIdentity, UserIdentityBuilder, UserProfile, UserProfileBuilder,
};
