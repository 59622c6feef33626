//! Core feed types.
//!
//! These types validate at construction time, so the pagination engine
//! never sees an empty feed name or a relative base URI.

mod direction;
mod entry;
mod entry_id;
mod feed_name;
mod feed_uri;

pub use direction::PageDirection;
pub use entry::{Cursor, Entry};
pub use entry_id::EntryId;
pub use feed_name::FeedName;
pub use feed_uri::FeedUri;
