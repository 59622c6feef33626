//! Marker resolution and page fetching.

use tracing::debug;

use crate::error::{Error, MARKER_NOT_FOUND_MESSAGE};
use crate::query::{CategoryPredicate, RangeQuery};
use crate::traits::EntryStore;
use crate::types::{Entry, EntryId, PageDirection};
use crate::Result;

use super::FeedRequest;

/// Everything the link builder needs to know about a resolved page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    /// The page, newest first.
    pub entries: Vec<Entry>,

    /// The marker and direction the page was anchored at, if any.
    pub anchor: Option<(EntryId, PageDirection)>,

    /// Whether an entry older than the page's oldest one exists.
    pub has_next: bool,

    /// For head requests, the newest entry of the oldest page.
    pub last_anchor: Option<Entry>,
}

/// Size of the oldest page for a feed of `count` matching entries.
///
/// The oldest page holds the remainder, or a full page when the count
/// divides evenly.
pub fn last_page_size(count: u64, page_size: u32) -> u32 {
    match count % u64::from(page_size) {
        0 => page_size,
        // The remainder is below page_size, so it fits.
        remainder => remainder as u32,
    }
}

/// Resolves head and marker requests against an entry store.
#[derive(Debug)]
pub struct CursorResolver<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> CursorResolver<'a, S>
where
    S: EntryStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Resolve a feed-head request: the newest page plus the auxiliary
    /// rows behind its `next` and `last` links.
    pub async fn resolve_head(&self, request: &FeedRequest) -> Result<ResolvedPage> {
        let predicate = CategoryPredicate::encode(request.search())?;
        let feed = request.feed();

        let entries = self
            .store
            .query(&RangeQuery::head(feed, &predicate, request.page_size()))
            .await?;
        let has_next = self.has_next(request, &predicate, &entries).await?;

        let count = self.store.count(feed, &predicate).await?;
        let last_size = last_page_size(count, request.page_size());
        debug!(%feed, count, last_size, "Sizing last page");

        let last_anchor = self
            .store
            .query(&RangeQuery::last_page(feed, &predicate, last_size))
            .await?
            .pop();

        Ok(ResolvedPage {
            entries,
            anchor: None,
            has_next,
            last_anchor,
        })
    }

    /// Resolve a request anchored at `marker`.
    ///
    /// The direction token is checked before any read, so a malformed
    /// request never touches the store.
    pub async fn resolve_page(&self, request: &FeedRequest, marker: &EntryId) -> Result<ResolvedPage> {
        let direction = PageDirection::from_token(request.direction())?;
        let predicate = CategoryPredicate::encode(request.search())?;
        let feed = request.feed();

        let marker_entry = self
            .store
            .get_entry(feed, marker)
            .await?
            .ok_or_else(|| Error::not_found(MARKER_NOT_FOUND_MESSAGE))?;

        debug!(%feed, %marker, %direction, "Resolved marker");

        let entries = match direction {
            PageDirection::Forward => {
                let query = RangeQuery::page_forward(
                    feed,
                    &predicate,
                    marker_entry.cursor(),
                    request.page_size(),
                );
                let mut entries = self.store.query(&query).await?;
                entries.reverse();
                entries
            }
            PageDirection::Backward => {
                let query = RangeQuery::page_backward(
                    feed,
                    &predicate,
                    marker_entry.cursor(),
                    request.page_size(),
                );
                self.store.query(&query).await?
            }
        };

        let has_next = self.has_next(request, &predicate, &entries).await?;

        Ok(ResolvedPage {
            entries,
            anchor: Some((marker.clone(), direction)),
            has_next,
            last_anchor: None,
        })
    }

    async fn has_next(
        &self,
        request: &FeedRequest,
        predicate: &CategoryPredicate,
        entries: &[Entry],
    ) -> Result<bool> {
        let Some(oldest) = entries.last() else {
            return Ok(false);
        };

        let query = RangeQuery::next_marker(request.feed(), predicate, oldest.cursor());
        Ok(!self.store.query(&query).await?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_takes_the_remainder() {
        assert_eq!(last_page_size(33, 10), 3);
        assert_eq!(last_page_size(1, 25), 1);
    }

    #[test]
    fn last_page_is_full_when_count_divides_evenly() {
        assert_eq!(last_page_size(30, 10), 10);
        assert_eq!(last_page_size(0, 25), 25);
    }
}
