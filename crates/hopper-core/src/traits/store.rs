//! Entry store trait.

use async_trait::async_trait;

use crate::query::{CategoryPredicate, RangeQuery};
use crate::types::{Entry, EntryId, FeedName};
use crate::Result;

/// A read-only view over the entry log.
///
/// Implementations execute range scans exactly as described by the
/// [`RangeQuery`] they receive: rows inside the range, in the query's
/// order, at most `limit` of them. Failures are reported as
/// [`StorageError`](crate::error::StorageError) and never retried by the
/// caller.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Point lookup of an entry by feed and id.
    async fn get_entry(&self, feed: &FeedName, id: &EntryId) -> Result<Option<Entry>>;

    /// Execute a range scan.
    async fn query(&self, query: &RangeQuery) -> Result<Vec<Entry>>;

    /// Count the entries of a feed matching a predicate.
    async fn count(&self, feed: &FeedName, predicate: &CategoryPredicate) -> Result<u64>;
}
