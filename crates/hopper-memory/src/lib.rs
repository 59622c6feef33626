//! hopper-memory - In-memory entry store.
//!
//! Serves as the test double for the pagination engine and as a local
//! store loaded from a JSON-lines fixture file.

mod store;

pub use store::MemoryStore;
