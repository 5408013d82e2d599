//! Persistence adapters for conversation history and user profiles.
//!
//! Two families of stores implement the `cicero_interface` storage
//! traits: in-memory stores for tests and local development, and
//! Firestore-backed stores for deployment. Firestore access goes
//! through the v1 REST API with bearer tokens from a [`TokenProvider`].

mod firestore;
mod memory;
mod token;

pub use firestore::{
    FirestoreClient, FirestoreConfig, FirestoreConfigBuilder, FirestoreHistoryStore,
    FirestoreProfileStore,
};
pub use memory::{MemoryHistoryStore, MemoryProfileStore};
pub use token::TokenProvider;
