//! SQL rendering of range queries.

use sqlx::{Postgres, QueryBuilder};

use hopper_core::query::{CategoryPredicate, RangeQuery, RangeShape, SortOrder};
use hopper_core::types::{Cursor, EntryId, FeedName};

const SELECT_ENTRIES: &str = "SELECT entryid, feed, creationdate, datelastupdated, entrybody, categories \
     FROM entries WHERE feed = ";

fn push_predicate(builder: &mut QueryBuilder<'static, Postgres>, predicate: &CategoryPredicate) {
    if !predicate.is_match_all() {
        builder
            .push(" AND categories @> ")
            .push_bind(predicate.categories().to_vec())
            .push("::varchar[]");
    }
}

fn push_key_bound(builder: &mut QueryBuilder<'static, Postgres>, op: &str, cursor: &Cursor) {
    builder
        .push(" AND (datelastupdated, entryid) ")
        .push(op)
        .push(" (")
        .push_bind(cursor.updated_at)
        .push(", ")
        .push_bind(cursor.id.as_str().to_string())
        .push(")");
}

/// Render a range scan.
pub(crate) fn range_query(query: &RangeQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_ENTRIES);
    builder.push_bind(query.feed().as_str().to_string());

    match query.shape() {
        RangeShape::Head | RangeShape::LastPage => {}
        RangeShape::PageForward { after } => push_key_bound(&mut builder, ">", after),
        RangeShape::PageBackward { at_or_before } => {
            push_key_bound(&mut builder, "<=", at_or_before)
        }
        RangeShape::NextMarker { before } => push_key_bound(&mut builder, "<", before),
    }

    push_predicate(&mut builder, query.predicate());

    builder.push(match query.order() {
        SortOrder::Ascending => " ORDER BY datelastupdated ASC, entryid ASC",
        SortOrder::Descending => " ORDER BY datelastupdated DESC, entryid DESC",
    });
    builder.push(" LIMIT ").push_bind(i64::from(query.limit()));

    builder
}

/// Render a point lookup.
pub(crate) fn entry_lookup(feed: &FeedName, id: &EntryId) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_ENTRIES);
    builder
        .push_bind(feed.as_str().to_string())
        .push(" AND entryid = ")
        .push_bind(id.as_str().to_string());
    builder
}

/// Render a count of matching entries.
pub(crate) fn entry_count(
    feed: &FeedName,
    predicate: &CategoryPredicate,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM entries WHERE feed = ");
    builder.push_bind(feed.as_str().to_string());
    push_predicate(&mut builder, predicate);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn feed() -> FeedName {
        FeedName::new("test").unwrap()
    }

    fn cursor() -> Cursor {
        Cursor {
            updated_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            id: EntryId::new("e1").unwrap(),
        }
    }

    const COLUMNS: &str =
        "SELECT entryid, feed, creationdate, datelastupdated, entrybody, categories FROM entries";

    #[test]
    fn head_without_categories() {
        let query = RangeQuery::head(&feed(), &CategoryPredicate::match_all(), 25);
        assert_eq!(
            range_query(&query).sql(),
            format!(
                "{COLUMNS} WHERE feed = $1 ORDER BY datelastupdated DESC, entryid DESC LIMIT $2"
            )
        );
    }

    #[test]
    fn head_with_categories() {
        let predicate = CategoryPredicate::encode("+cat1+cat2").unwrap();
        let query = RangeQuery::head(&feed(), &predicate, 25);
        assert_eq!(
            range_query(&query).sql(),
            format!(
                "{COLUMNS} WHERE feed = $1 AND categories @> $2::varchar[] \
                 ORDER BY datelastupdated DESC, entryid DESC LIMIT $3"
            )
        );
    }

    #[test]
    fn forward_page_is_exclusive_and_ascending() {
        let query =
            RangeQuery::page_forward(&feed(), &CategoryPredicate::match_all(), cursor(), 10);
        assert_eq!(
            range_query(&query).sql(),
            format!(
                "{COLUMNS} WHERE feed = $1 AND (datelastupdated, entryid) > ($2, $3) \
                 ORDER BY datelastupdated ASC, entryid ASC LIMIT $4"
            )
        );
    }

    #[test]
    fn backward_page_is_inclusive_and_descending() {
        let predicate = CategoryPredicate::encode("cat1").unwrap();
        let query = RangeQuery::page_backward(&feed(), &predicate, cursor(), 10);
        assert_eq!(
            range_query(&query).sql(),
            format!(
                "{COLUMNS} WHERE feed = $1 AND (datelastupdated, entryid) <= ($2, $3) \
                 AND categories @> $4::varchar[] ORDER BY datelastupdated DESC, entryid DESC LIMIT $5"
            )
        );
    }

    #[test]
    fn next_marker_is_strict() {
        let query = RangeQuery::next_marker(&feed(), &CategoryPredicate::match_all(), cursor());
        assert!(
            range_query(&query)
                .sql()
                .contains("(datelastupdated, entryid) < ($2, $3)")
        );
    }

    #[test]
    fn last_page_is_ascending() {
        let query = RangeQuery::last_page(&feed(), &CategoryPredicate::match_all(), 3);
        assert_eq!(
            range_query(&query).sql(),
            format!(
                "{COLUMNS} WHERE feed = $1 ORDER BY datelastupdated ASC, entryid ASC LIMIT $2"
            )
        );
    }

    #[test]
    fn lookup_and_count() {
        let id = EntryId::new("e1").unwrap();
        assert_eq!(
            entry_lookup(&feed(), &id).sql(),
            format!("{COLUMNS} WHERE feed = $1 AND entryid = $2")
        );

        let predicate = CategoryPredicate::encode("cat1").unwrap();
        assert_eq!(
            entry_count(&feed(), &predicate).sql(),
            "SELECT COUNT(*) FROM entries WHERE feed = $1 AND categories @> $2::varchar[]"
        );
    }
}
