//! Page request parameters.

use serde::Deserialize;

use crate::error::BadRequestError;
use crate::types::{EntryId, FeedName, FeedUri};
use crate::Result;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Raw query-string parameters of a feed request, before validation.
///
/// Field names match the query-string parameter names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQueryParams {
    pub limit: Option<String>,
    pub marker: Option<String>,
    pub direction: Option<String>,
    pub search: Option<String>,
}

/// A validated request for one page of a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    feed: FeedName,
    base_uri: FeedUri,
    page_size: u32,
    marker: Option<EntryId>,
    direction: Option<String>,
    search: String,
}

impl FeedRequest {
    /// A feed-head request with the default page size and no filter.
    pub fn new(feed: FeedName, base_uri: FeedUri) -> Self {
        Self {
            feed,
            base_uri,
            page_size: DEFAULT_PAGE_SIZE,
            marker: None,
            direction: None,
            search: String::new(),
        }
    }

    /// Build a request from raw query-string parameters.
    ///
    /// A blank `limit` falls back to [`DEFAULT_PAGE_SIZE`] and a blank
    /// `marker` means a feed-head request. The direction token is kept
    /// verbatim; it is only checked when a marker is present.
    pub fn from_params(feed: FeedName, base_uri: FeedUri, params: &FeedQueryParams) -> Result<Self> {
        let mut request = Self::new(feed, base_uri);

        if let Some(limit) = params.limit.as_deref().filter(|l| !l.trim().is_empty()) {
            let page_size = limit.trim().parse::<u32>().map_err(|e| {
                BadRequestError::InvalidPageSize {
                    value: limit.to_string(),
                    reason: e.to_string(),
                }
            })?;
            request = request.with_page_size(page_size)?;
        }

        if let Some(marker) = params.marker.as_deref().filter(|m| !m.trim().is_empty()) {
            request = request.with_marker(EntryId::new(marker)?);
        }

        if let Some(direction) = &params.direction {
            request = request.with_direction(direction.clone());
        }

        if let Some(search) = &params.search {
            request = request.with_search(search);
        }

        Ok(request)
    }

    /// Set the page size.
    ///
    /// # Errors
    ///
    /// A page size of zero is rejected.
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(BadRequestError::InvalidPageSize {
                value: page_size.to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        self.page_size = page_size;
        Ok(self)
    }

    /// Anchor the request at a marker.
    pub fn with_marker(mut self, marker: EntryId) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Set the raw direction token.
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Set the search query, trimmed. A blank query means no filter.
    pub fn with_search(mut self, search: impl AsRef<str>) -> Self {
        self.search = search.as_ref().trim().to_string();
        self
    }

    pub fn feed(&self) -> &FeedName {
        &self.feed
    }

    pub fn base_uri(&self) -> &FeedUri {
        &self.base_uri
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn marker(&self) -> Option<&EntryId> {
        self.marker.as_ref()
    }

    pub fn direction(&self) -> Option<&str> {
        self.direction.as_deref()
    }

    /// The search query; empty when no filter was given.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns true if the request carries a category filter.
    pub fn has_search(&self) -> bool {
        !self.search.is_empty()
    }
}
