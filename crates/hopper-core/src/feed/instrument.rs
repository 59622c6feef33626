//! Timing decorator for feed sources.

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{Instrument, debug, info_span, warn};

use crate::traits::FeedSource;
use crate::types::{Entry, EntryId, FeedName};
use crate::Result;

use super::{FeedRequest, Page};

/// Wraps a [`FeedSource`] and times every operation.
///
/// Each call runs inside a `feed_source` span and finishes with one event
/// carrying the operation name and elapsed milliseconds. Operation names
/// include the page size and whether a category filter was applied, e.g.
/// `get-feed-head-with-cats-25`.
#[derive(Debug, Clone)]
pub struct Instrumented<F> {
    inner: F,
}

impl<F: FeedSource> Instrumented<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

fn operation_name(prefix: &str, request: &FeedRequest) -> String {
    if request.has_search() {
        format!("{}-with-cats-{}", prefix, request.page_size())
    } else {
        format!("{}-{}", prefix, request.page_size())
    }
}

async fn timed<T, Fut>(operation: &str, fut: Fut) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    let started = Instant::now();
    let result = fut
        .instrument(info_span!("feed_source", operation))
        .await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => debug!(operation, elapsed_ms, "Operation completed"),
        Err(err) if err.is_not_found() || err.is_bad_request() => {
            debug!(operation, elapsed_ms, error = %err, "Operation rejected")
        }
        Err(err) => warn!(operation, elapsed_ms, error = %err, "Operation failed"),
    }

    result
}

#[async_trait]
impl<F: FeedSource> FeedSource for Instrumented<F> {
    async fn get_feed_head(&self, request: &FeedRequest) -> Result<Page> {
        let operation = operation_name("get-feed-head", request);
        timed(&operation, self.inner.get_feed_head(request)).await
    }

    async fn get_feed_page(&self, request: &FeedRequest, marker: &EntryId) -> Result<Page> {
        let operation = operation_name("get-feed-page", request);
        timed(&operation, self.inner.get_feed_page(request, marker)).await
    }

    async fn get_entry(&self, feed: &FeedName, id: &EntryId) -> Result<Entry> {
        timed("get-entry", self.inner.get_entry(feed, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedUri;

    #[test]
    fn operation_names_reflect_filter_and_size() {
        let request = FeedRequest::new(
            FeedName::new("test").unwrap(),
            FeedUri::new("http://localhost/test").unwrap(),
        );
        assert_eq!(operation_name("get-feed-head", &request), "get-feed-head-25");

        let blank = request.clone().with_search("  ");
        assert_eq!(operation_name("get-feed-head", &blank), "get-feed-head-25");

        let filtered = request.with_search("cat1");
        assert_eq!(
            operation_name("get-feed-page", &filtered),
            "get-feed-page-with-cats-25"
        );
    }
}
