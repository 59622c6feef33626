//! Page assembly over an entry store.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::Error;
use crate::traits::{EntryStore, FeedSource};
use crate::types::{Entry, EntryId, FeedName};
use crate::Result;

use super::{CursorResolver, FeedRequest, LinkBuilder, Page, ResolvedPage};

/// A [`FeedSource`] serving pages straight from an entry log.
#[derive(Debug, Clone)]
pub struct LogFeedSource<S> {
    store: S,
}

impl<S: EntryStore> LogFeedSource<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Combine a resolved page with its navigation links.
///
/// An empty page only carries `current` and `self`.
pub(crate) fn assemble(request: &FeedRequest, resolved: ResolvedPage) -> Page {
    let builder = LinkBuilder::new(request);
    let anchor = resolved
        .anchor
        .as_ref()
        .map(|(marker, direction)| (marker, *direction));

    let mut links = vec![builder.current(), builder.self_link(anchor)];

    if let (Some(newest), Some(oldest)) = (resolved.entries.first(), resolved.entries.last()) {
        links.push(builder.previous(&newest.id));
        if resolved.has_next {
            links.push(builder.next(&oldest.id));
        }
    }

    if let Some(last) = &resolved.last_anchor {
        links.push(builder.last(&last.id));
    }

    Page {
        feed: request.feed().clone(),
        entries: resolved.entries,
        links,
    }
}

#[async_trait]
impl<S: EntryStore> FeedSource for LogFeedSource<S> {
    #[instrument(skip(self, request), fields(feed = %request.feed(), limit = request.page_size()))]
    async fn get_feed_head(&self, request: &FeedRequest) -> Result<Page> {
        let resolved = CursorResolver::new(&self.store)
            .resolve_head(request)
            .await?;
        debug!(entries = resolved.entries.len(), "Resolved feed head");
        Ok(assemble(request, resolved))
    }

    #[instrument(skip(self, request, marker), fields(feed = %request.feed(), marker = %marker))]
    async fn get_feed_page(&self, request: &FeedRequest, marker: &EntryId) -> Result<Page> {
        let resolved = CursorResolver::new(&self.store)
            .resolve_page(request, marker)
            .await?;
        debug!(entries = resolved.entries.len(), "Resolved feed page");
        Ok(assemble(request, resolved))
    }

    #[instrument(skip(self))]
    async fn get_entry(&self, feed: &FeedName, id: &EntryId) -> Result<Entry> {
        self.store
            .get_entry(feed, id)
            .await?
            .ok_or_else(|| Error::not_found(format!("No entry '{}' in feed '{}'", id, feed)))
    }
}
