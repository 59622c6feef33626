//! Single entry lookup command.

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;

use hopper_core::atom::hydrate_entry;
use hopper_core::{EntryId, FeedSource, Instrumented, LogFeedSource};

use crate::cli::{OutputFormat, StoreArgs};
use crate::output;
use crate::store::CliStore;

#[derive(Args, Debug)]
pub struct EntryArgs {
    /// Feed name, e.g. namespace/feed
    pub feed: String,

    /// Entry id
    pub id: String,

    /// Output format (atom or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Summary of a hydrated entry.
#[derive(Serialize)]
struct EntryView<'a> {
    id: &'a str,
    feed: &'a str,
    title: String,
    created: String,
    updated: String,
    categories: &'a [String],
}

pub async fn run(store_args: &StoreArgs, args: EntryArgs) -> Result<()> {
    if args.format == OutputFormat::Links {
        bail!("Entries have no navigation links; use --format atom or --format json");
    }

    let (feed, _) = super::feed_location(store_args, &args.feed)?;
    let id = EntryId::new(&args.id).with_context(|| format!("Invalid entry id: {}", args.id))?;

    let store = CliStore::open(store_args).await?;
    let source = Instrumented::new(LogFeedSource::new(store));

    let entry = source
        .get_entry(&feed, &id)
        .await
        .with_context(|| format!("Failed to read entry {} from {}", id, feed))?;
    let hydrated = hydrate_entry(&entry).context("Failed to parse stored entry")?;

    match args.format {
        OutputFormat::Atom => println!("{}", entry.body.trim()),
        _ => output::json_pretty(&EntryView {
            id: entry.id.as_str(),
            feed: entry.feed.as_str(),
            title: hydrated.title().value.clone(),
            created: entry.created_at.to_rfc3339(),
            updated: hydrated.updated().to_rfc3339(),
            categories: &entry.categories,
        })?,
    }

    Ok(())
}
