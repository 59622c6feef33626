//! Command implementations.

pub mod entry;
pub mod feed;

use anyhow::{Context, Result};

use hopper_core::{FeedName, FeedUri};

use crate::cli::StoreArgs;

/// Parse the feed name argument and the configured base URI.
fn feed_location(store: &StoreArgs, feed: &str) -> Result<(FeedName, FeedUri)> {
    let feed = FeedName::new(feed).with_context(|| format!("Invalid feed name: {}", feed))?;
    let base = FeedUri::new(&store.base_uri)
        .with_context(|| format!("Invalid base URI: {}", store.base_uri))?;
    Ok((feed, base))
}
