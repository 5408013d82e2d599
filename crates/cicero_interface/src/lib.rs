//! Trait definitions for the Cicero assistant backend.
//!
//! These are the seams between the orchestration core and its external
//! collaborators: the generation backend, the identity provider, the
//! document store, and the search API. Service instances implementing
//! these traits are constructed once at startup and injected into request
//! handlers; there are no module-level singletons.

mod generation;
mod identity;
mod search;
mod store;

pub use generation::GenerationBackend;
pub use identity::IdentityVerifier;
pub use search::SearchBackend;
pub use store::{HistoryStore, ProfileStore};
