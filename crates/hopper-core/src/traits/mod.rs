//! Core traits for entry storage and feed sources.

mod source;
mod store;

pub use source::FeedSource;
pub use store::EntryStore;
