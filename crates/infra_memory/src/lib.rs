//! In-memory adapters for the claim system store ports
//!
//! These adapters implement the `domain_claims` port traits over plain maps
//! behind async locks. They are the reference implementation of the store
//! seam (a database adapter would implement the same traits) and the backing
//! used by the engine and tracker test suites.

pub mod stores;
pub mod notifications;

pub use stores::{MemoryClaimStore, MemoryDocumentStore, MemoryLecturerStore};
pub use notifications::{RecordingSink, TracingSink};
