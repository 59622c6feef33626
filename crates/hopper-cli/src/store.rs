//! Store selection from a URL.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tracing::info;
use url::Url;

use hopper_core::{CategoryPredicate, Entry, EntryId, EntryStore, FeedName, RangeQuery};
use hopper_memory::MemoryStore;
use hopper_postgres::PgStore;

use crate::cli::StoreArgs;

/// The entry store named on the command line.
pub enum CliStore {
    /// JSON-lines fixture loaded into memory.
    Memory(MemoryStore),
    /// Relational entry log.
    Postgres(PgStore),
}

impl CliStore {
    pub async fn open(args: &StoreArgs) -> Result<Self> {
        let raw = args
            .store
            .as_deref()
            .context("No store configured. Pass --store or set HOPPER_STORE")?;

        let url = Url::parse(raw).with_context(|| format!("Invalid store URL: {}", raw))?;

        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| anyhow::anyhow!("Invalid file path in store URL: {}", raw))?;
                let store = MemoryStore::load(&path)
                    .with_context(|| format!("Failed to load entries from {}", path.display()))?;
                info!(path = %path.display(), "Opened file store");
                Ok(CliStore::Memory(store))
            }
            "postgres" | "postgresql" => {
                let store = PgStore::connect(raw, args.max_connections)
                    .await
                    .context("Failed to connect to Postgres")?;
                info!(max_connections = args.max_connections, "Opened Postgres store");
                Ok(CliStore::Postgres(store))
            }
            other => bail!("Unsupported store scheme: {}", other),
        }
    }
}

#[async_trait]
impl EntryStore for CliStore {
    async fn get_entry(&self, feed: &FeedName, id: &EntryId) -> hopper_core::Result<Option<Entry>> {
        match self {
            CliStore::Memory(store) => store.get_entry(feed, id).await,
            CliStore::Postgres(store) => store.get_entry(feed, id).await,
        }
    }

    async fn query(&self, query: &RangeQuery) -> hopper_core::Result<Vec<Entry>> {
        match self {
            CliStore::Memory(store) => store.query(query).await,
            CliStore::Postgres(store) => store.query(query).await,
        }
    }

    async fn count(
        &self,
        feed: &FeedName,
        predicate: &CategoryPredicate,
    ) -> hopper_core::Result<u64> {
        match self {
            CliStore::Memory(store) => store.count(feed, predicate).await,
            CliStore::Postgres(store) => store.count(feed, predicate).await,
        }
    }
}
