//! Feed paging command.

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use hopper_core::atom::render_page;
use hopper_core::{FeedQueryParams, FeedRequest, FeedSource, Instrumented, LogFeedSource};

use crate::cli::{OutputFormat, StoreArgs};
use crate::output;
use crate::store::CliStore;

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Feed name, e.g. namespace/feed
    pub feed: String,

    /// Page size
    #[arg(long)]
    pub limit: Option<String>,

    /// Entry id to page from
    #[arg(long)]
    pub marker: Option<String>,

    /// Page direction: forward or backward
    #[arg(long)]
    pub direction: Option<String>,

    /// Category search expression, e.g. "cat1+cat2"
    #[arg(long)]
    pub search: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Atom)]
    pub format: OutputFormat,
}

pub async fn run(store_args: &StoreArgs, args: FeedArgs) -> Result<()> {
    let (feed, base) = super::feed_location(store_args, &args.feed)?;

    let params = FeedQueryParams {
        limit: args.limit,
        marker: args.marker,
        direction: args.direction,
        search: args.search,
    };
    let request = FeedRequest::from_params(feed.clone(), base.join_feed(&feed), &params)
        .context("Invalid feed request")?;

    let store = CliStore::open(store_args).await?;
    let source = Instrumented::new(LogFeedSource::new(store));

    let page = source
        .get_feed(&request)
        .await
        .with_context(|| format!("Failed to read feed {}", feed))?;

    debug!(feed = %feed, entries = page.entries.len(), "Fetched page");

    match args.format {
        OutputFormat::Atom => {
            // atom_syndication's Feed implements ToString but not Display
            let xml = render_page(&page).context("Failed to render feed")?.to_string();
            println!("{}", xml);
        }
        OutputFormat::Json => output::json_pretty(&page)?,
        OutputFormat::Links => {
            for link in &page.links {
                output::field(link.rel.as_str(), &link.href);
            }
        }
    }

    Ok(())
}
