//! Feed source trait.

use async_trait::async_trait;

use crate::feed::{FeedRequest, Page};
use crate::types::{Entry, EntryId, FeedName};
use crate::Result;

/// Something that can serve feed pages and single entries.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Serve the newest page of a feed, with its `last` link.
    async fn get_feed_head(&self, request: &FeedRequest) -> Result<Page>;

    /// Serve the page anchored at `marker` in the request's direction.
    async fn get_feed_page(&self, request: &FeedRequest, marker: &EntryId) -> Result<Page>;

    /// Fetch a single entry.
    ///
    /// A miss is reported as [`Error::NotFound`](crate::Error::NotFound).
    async fn get_entry(&self, feed: &FeedName, id: &EntryId) -> Result<Entry>;

    /// Serve a page, dispatching on whether the request carries a marker.
    async fn get_feed(&self, request: &FeedRequest) -> Result<Page> {
        match request.marker() {
            Some(marker) => self.get_feed_page(request, marker).await,
            None => self.get_feed_head(request).await,
        }
    }
}
