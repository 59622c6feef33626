//! Range-query planning.
//!
//! Every read the pagination engine makes against the log is one of five
//! shapes. All of them are independent, read-only range scans over the
//! `(updated_at, id)` key of a single feed.

use crate::types::{Cursor, Entry, FeedName};

use super::CategoryPredicate;

/// Scan order over the `(updated_at, id)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// The five canonical range-query shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeShape {
    /// Newest entries first.
    Head,

    /// Entries strictly newer than the cursor, oldest first.
    PageForward { after: Cursor },

    /// The cursor entry and everything older, newest first.
    PageBackward { at_or_before: Cursor },

    /// The single newest entry strictly older than the cursor.
    NextMarker { before: Cursor },

    /// Oldest entries first.
    LastPage,
}

/// A fully-parameterized range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    feed: FeedName,
    predicate: CategoryPredicate,
    shape: RangeShape,
    limit: u32,
}

impl RangeQuery {
    /// The newest `limit` entries of a feed.
    pub fn head(feed: &FeedName, predicate: &CategoryPredicate, limit: u32) -> Self {
        Self::new(feed, predicate, RangeShape::Head, limit)
    }

    /// Up to `limit` entries newer than the marker, oldest first.
    pub fn page_forward(
        feed: &FeedName,
        predicate: &CategoryPredicate,
        marker: Cursor,
        limit: u32,
    ) -> Self {
        Self::new(feed, predicate, RangeShape::PageForward { after: marker }, limit)
    }

    /// The marker and up to `limit - 1` older entries, newest first.
    pub fn page_backward(
        feed: &FeedName,
        predicate: &CategoryPredicate,
        marker: Cursor,
        limit: u32,
    ) -> Self {
        Self::new(
            feed,
            predicate,
            RangeShape::PageBackward {
                at_or_before: marker,
            },
            limit,
        )
    }

    /// Existence probe for anything older than a page's oldest entry.
    pub fn next_marker(feed: &FeedName, predicate: &CategoryPredicate, oldest: Cursor) -> Self {
        Self::new(feed, predicate, RangeShape::NextMarker { before: oldest }, 1)
    }

    /// The oldest `last_page_size` entries, oldest first.
    pub fn last_page(feed: &FeedName, predicate: &CategoryPredicate, last_page_size: u32) -> Self {
        Self::new(feed, predicate, RangeShape::LastPage, last_page_size)
    }

    fn new(feed: &FeedName, predicate: &CategoryPredicate, shape: RangeShape, limit: u32) -> Self {
        Self {
            feed: feed.clone(),
            predicate: predicate.clone(),
            shape,
            limit,
        }
    }

    pub fn feed(&self) -> &FeedName {
        &self.feed
    }

    pub fn predicate(&self) -> &CategoryPredicate {
        &self.predicate
    }

    pub fn shape(&self) -> &RangeShape {
        &self.shape
    }

    /// Maximum number of rows the scan may return.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// The order in which the store must return rows.
    pub fn order(&self) -> SortOrder {
        match self.shape {
            RangeShape::PageForward { .. } | RangeShape::LastPage => SortOrder::Ascending,
            RangeShape::Head
            | RangeShape::PageBackward { .. }
            | RangeShape::NextMarker { .. } => SortOrder::Descending,
        }
    }

    /// Check whether an entry falls inside this scan's range.
    ///
    /// Ordering and the row limit are not considered.
    pub fn admits(&self, entry: &Entry) -> bool {
        if entry.feed != self.feed || !self.predicate.matches(&entry.categories) {
            return false;
        }

        let position = entry.cursor();
        match &self.shape {
            RangeShape::Head | RangeShape::LastPage => true,
            RangeShape::PageForward { after } => position > *after,
            RangeShape::PageBackward { at_or_before } => position <= *at_or_before,
            RangeShape::NextMarker { before } => position < *before,
        }
    }

    /// Short label used in logs and span names.
    pub fn label(&self) -> &'static str {
        match (&self.shape, self.predicate.is_match_all()) {
            (RangeShape::Head, true) => "feed-head",
            (RangeShape::Head, false) => "feed-head-with-cats",
            (RangeShape::PageForward { .. }, true) => "feed-forward",
            (RangeShape::PageForward { .. }, false) => "feed-forward-with-cats",
            (RangeShape::PageBackward { .. }, true) => "feed-backward",
            (RangeShape::PageBackward { .. }, false) => "feed-backward-with-cats",
            (RangeShape::NextMarker { .. }, true) => "next-marker",
            (RangeShape::NextMarker { .. }, false) => "next-marker-with-cats",
            (RangeShape::LastPage, true) => "last-page",
            (RangeShape::LastPage, false) => "last-page-with-cats",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryId;
    use chrono::{TimeZone, Utc};

    fn feed() -> FeedName {
        FeedName::new("test").unwrap()
    }

    fn entry(id: &str, secs: i64, categories: &[&str]) -> Entry {
        let at = Utc.timestamp_opt(secs, 0).unwrap();
        Entry {
            id: EntryId::new(id).unwrap(),
            feed: feed(),
            created_at: at,
            updated_at: at,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            body: String::new(),
        }
    }

    #[test]
    fn orders_follow_shape() {
        let all = CategoryPredicate::match_all();
        let marker = entry("m", 10, &[]).cursor();

        assert_eq!(RangeQuery::head(&feed(), &all, 5).order(), SortOrder::Descending);
        assert_eq!(
            RangeQuery::page_forward(&feed(), &all, marker.clone(), 5).order(),
            SortOrder::Ascending
        );
        assert_eq!(
            RangeQuery::page_backward(&feed(), &all, marker.clone(), 5).order(),
            SortOrder::Descending
        );
        assert_eq!(
            RangeQuery::next_marker(&feed(), &all, marker).order(),
            SortOrder::Descending
        );
        assert_eq!(RangeQuery::last_page(&feed(), &all, 5).order(), SortOrder::Ascending);
    }

    #[test]
    fn next_marker_is_limited_to_one_row() {
        let all = CategoryPredicate::match_all();
        let query = RangeQuery::next_marker(&feed(), &all, entry("m", 10, &[]).cursor());
        assert_eq!(query.limit(), 1);
    }

    #[test]
    fn backward_bound_is_inclusive_and_forward_is_exclusive() {
        let all = CategoryPredicate::match_all();
        let marker = entry("m", 10, &[]);

        let backward = RangeQuery::page_backward(&feed(), &all, marker.cursor(), 5);
        let forward = RangeQuery::page_forward(&feed(), &all, marker.cursor(), 5);
        let next = RangeQuery::next_marker(&feed(), &all, marker.cursor());

        assert!(backward.admits(&marker));
        assert!(!forward.admits(&marker));
        assert!(!next.admits(&marker));

        assert!(forward.admits(&entry("n", 11, &[])));
        assert!(next.admits(&entry("l", 9, &[])));
    }

    #[test]
    fn equal_timestamps_break_ties_on_id() {
        let all = CategoryPredicate::match_all();
        let marker = entry("m", 10, &[]);
        let forward = RangeQuery::page_forward(&feed(), &all, marker.cursor(), 5);

        assert!(forward.admits(&entry("z", 10, &[])));
        assert!(!forward.admits(&entry("a", 10, &[])));
    }

    #[test]
    fn admits_only_matching_feed_and_categories() {
        let predicate = CategoryPredicate::encode("+cat1").unwrap();
        let query = RangeQuery::head(&feed(), &predicate, 5);

        assert!(query.admits(&entry("a", 1, &["cat1", "cat2"])));
        assert!(!query.admits(&entry("b", 1, &["cat2"])));

        let mut other_feed = entry("c", 1, &["cat1"]);
        other_feed.feed = FeedName::new("other").unwrap();
        assert!(!query.admits(&other_feed));
    }

    #[test]
    fn labels_distinguish_filtered_scans() {
        let all = CategoryPredicate::match_all();
        let cats = CategoryPredicate::encode("cat1").unwrap();
        assert_eq!(RangeQuery::head(&feed(), &all, 1).label(), "feed-head");
        assert_eq!(
            RangeQuery::last_page(&feed(), &cats, 1).label(),
            "last-page-with-cats"
        );
    }
}
