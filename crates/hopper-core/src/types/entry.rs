//! Stored entry type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntryId, FeedName};

/// A persisted feed entry.
///
/// Entries are immutable from the read path's point of view. `updated_at`
/// is the sort key; `created_at` never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The entry id, unique within its feed.
    pub id: EntryId,

    /// The feed this entry belongs to.
    pub feed: FeedName,

    /// When the entry was first written.
    pub created_at: DateTime<Utc>,

    /// When the entry was last written.
    pub updated_at: DateTime<Utc>,

    /// Category tags.
    #[serde(default)]
    pub categories: Vec<String>,

    /// The serialized Atom entry document.
    pub body: String,
}

impl Entry {
    /// Returns the position of this entry in canonical feed order.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            updated_at: self.updated_at,
            id: self.id.clone(),
        }
    }
}

/// A position in a feed's canonical order.
///
/// Ordering is by `updated_at`, then by `id`, so entries written in the
/// same instant still have a total order and a marker never skips or
/// repeats a sibling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cursor {
    pub updated_at: DateTime<Utc>,
    pub id: EntryId,
}
