//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::entry::EntryArgs;
use crate::commands::feed::FeedArgs;

/// Page through hopper feeds.
#[derive(Parser, Debug)]
#[command(name = "hopper")]
#[command(author, version = env!("HOPPER_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where entries are read from and how links are addressed.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Entry store URL: postgres://... or file:///path/to/entries.jsonl
    #[arg(long, env = "HOPPER_STORE", global = true)]
    pub store: Option<String>,

    /// Base URI that feed names are appended to when building links
    #[arg(
        long,
        env = "HOPPER_BASE_URI",
        default_value = "http://localhost:8080",
        global = true
    )]
    pub base_uri: String,

    /// Maximum Postgres pool size
    #[arg(long, default_value_t = 5, global = true)]
    pub max_connections: u32,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a page of a feed
    Feed(FeedArgs),

    /// Fetch a single entry
    Entry(EntryArgs),
}

/// Output format for documents.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Atom XML document
    Atom,
    /// JSON
    Json,
    /// Navigation links only, one per line
    Links,
}
