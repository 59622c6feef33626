//! hopper-core - Core feed types, traits and cursor pagination.
//!
//! The read path of a feed-hosting service: an append-only entry log is
//! paged newest-first using entry ids as markers, and every page carries the
//! navigation links a client needs to walk the whole feed in either
//! direction.

pub mod atom;
pub mod error;
pub mod feed;
pub mod query;
pub mod traits;
pub mod types;

pub use error::Error;
pub use feed::{
    DEFAULT_PAGE_SIZE, FeedQueryParams, FeedRequest, Instrumented, Link, LogFeedSource, Page,
    Relation,
};
pub use query::{CategoryPredicate, RangeQuery, RangeShape, SortOrder};
pub use traits::{EntryStore, FeedSource};
pub use types::{Cursor, Entry, EntryId, FeedName, FeedUri, PageDirection};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
