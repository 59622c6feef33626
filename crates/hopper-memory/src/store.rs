//! In-memory entry log.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use hopper_core::Result;
use hopper_core::error::{Error, StorageError};
use hopper_core::query::{CategoryPredicate, RangeQuery, SortOrder};
use hopper_core::traits::EntryStore;
use hopper_core::types::{Entry, EntryId, FeedName};

fn map_io(err: std::io::Error) -> Error {
    Error::Storage(StorageError::Backend {
        message: format!("IO error: {}", err),
    })
}

/// An entry log held in memory.
///
/// Clones share the same log. Entries are kept sorted by `(updated_at, id)`
/// so every scan is a filtered walk in one direction.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<Vec<Entry>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given entries.
    pub fn with_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut entries: Vec<Entry> = entries.into_iter().collect();
        entries.sort_by_key(Entry::cursor);
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Load a store from a JSON-lines file, one entry per line.
    ///
    /// Blank lines are skipped. A line that does not decode fails the load
    /// with its line number.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(map_io)?;

        let mut entries = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry: Entry = serde_json::from_str(line).map_err(|e| {
                Error::Storage(StorageError::CorruptRow {
                    message: format!("line {}: {}", index + 1, e),
                })
            })?;
            entries.push(entry);
        }

        debug!(count = entries.len(), "Loaded entries");

        Ok(Self::with_entries(entries))
    }

    /// Append an entry, replacing any entry with the same feed and id.
    pub async fn insert(&self, entry: Entry) {
        let mut entries = self.entries.write().await;
        entries.retain(|e| !(e.feed == entry.feed && e.id == entry.id));

        let position = entries.partition_point(|e| e.cursor() < entry.cursor());
        entries.insert(position, entry);
    }

    /// Number of entries across all feeds.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn get_entry(&self, feed: &FeedName, id: &EntryId) -> Result<Option<Entry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|e| &e.feed == feed && &e.id == id)
            .cloned())
    }

    #[instrument(skip(self, query), fields(scan = query.label(), feed = %query.feed(), limit = query.limit()))]
    async fn query(&self, query: &RangeQuery) -> Result<Vec<Entry>> {
        let entries = self.entries.read().await;
        let limit = query.limit() as usize;
        let admitted = |e: &&Entry| query.admits(e);

        let rows: Vec<Entry> = match query.order() {
            SortOrder::Ascending => entries.iter().filter(admitted).take(limit).cloned().collect(),
            SortOrder::Descending => entries
                .iter()
                .rev()
                .filter(admitted)
                .take(limit)
                .cloned()
                .collect(),
        };

        debug!(rows = rows.len(), "Scanned entries");
        Ok(rows)
    }

    async fn count(&self, feed: &FeedName, predicate: &CategoryPredicate) -> Result<u64> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| &e.feed == feed && predicate.matches(&e.categories))
            .count() as u64)
    }
}
