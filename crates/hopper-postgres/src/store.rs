//! PostgreSQL entry store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info, instrument};

use hopper_core::Result;
use hopper_core::error::{Error, StorageError};
use hopper_core::query::{CategoryPredicate, RangeQuery};
use hopper_core::traits::EntryStore;
use hopper_core::types::{Entry, EntryId, FeedName};

use crate::sql;

fn map_sqlx(err: sqlx::Error) -> Error {
    Error::Storage(StorageError::Backend {
        message: err.to_string(),
    })
}

/// A row of the `entries` table.
#[derive(Debug, FromRow)]
struct EntryRow {
    entryid: String,
    feed: String,
    creationdate: DateTime<Utc>,
    datelastupdated: DateTime<Utc>,
    entrybody: String,
    categories: Vec<String>,
}

impl TryFrom<EntryRow> for Entry {
    type Error = Error;

    fn try_from(row: EntryRow) -> Result<Self> {
        let corrupt = |e: Error| -> Error {
            Error::Storage(StorageError::CorruptRow {
                message: e.to_string(),
            })
        };

        Ok(Entry {
            id: EntryId::new(&row.entryid).map_err(corrupt)?,
            feed: FeedName::new(&row.feed).map_err(corrupt)?,
            created_at: row.creationdate,
            updated_at: row.datelastupdated,
            categories: row.categories,
            body: row.entrybody,
        })
    }
}

/// Entry store over a PostgreSQL connection pool.
///
/// Each call checks a connection out of the pool for a single statement.
/// A page request's statements do not share a transaction.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect a new pool to the given database URL.
    #[instrument(skip(url))]
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(map_sqlx)?;

        info!("Connected entry store");
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for PgStore {
    #[instrument(skip(self))]
    async fn get_entry(&self, feed: &FeedName, id: &EntryId) -> Result<Option<Entry>> {
        let mut builder = sql::entry_lookup(feed, id);
        let row = builder
            .build_query_as::<EntryRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Entry::try_from).transpose()
    }

    #[instrument(skip(self, query), fields(scan = query.label(), feed = %query.feed(), limit = query.limit()))]
    async fn query(&self, query: &RangeQuery) -> Result<Vec<Entry>> {
        let mut builder = sql::range_query(query);
        let rows = builder
            .build_query_as::<EntryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        debug!(rows = rows.len(), "Scanned entries");
        rows.into_iter().map(Entry::try_from).collect()
    }

    #[instrument(skip(self, predicate), fields(categories = predicate.categories().len()))]
    async fn count(&self, feed: &FeedName, predicate: &CategoryPredicate) -> Result<u64> {
        let mut builder = sql::entry_count(feed, predicate);
        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(count.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(entryid: &str, feed: &str) -> EntryRow {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        EntryRow {
            entryid: entryid.to_string(),
            feed: feed.to_string(),
            creationdate: at,
            datelastupdated: at,
            entrybody: "<entry/>".to_string(),
            categories: vec!["cat1".to_string()],
        }
    }

    #[test]
    fn converts_rows_to_entries() {
        let entry = Entry::try_from(row("urn:uuid:1", "ns/feed")).unwrap();
        assert_eq!(entry.id.as_str(), "urn:uuid:1");
        assert_eq!(entry.feed.as_str(), "ns/feed");
        assert_eq!(entry.categories, ["cat1"]);
    }

    #[test]
    fn invalid_rows_are_corrupt() {
        let err = Entry::try_from(row("", "ns/feed")).unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::CorruptRow { .. })));
    }
}
