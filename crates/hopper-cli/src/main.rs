//! hopper - CLI tool for paging feeds.
//!
//! A thin wrapper over `hopper-core`, serving the same pages and links a
//! transport layer would, from either a Postgres entry log or a local
//! JSON-lines fixture.

mod cli;
mod commands;
mod output;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Feed(args) => commands::feed::run(&cli.store, args).await,
        Commands::Entry(args) => commands::entry::run(&cli.store, args).await,
    }
}

/// Default filter for each `-v` level. `RUST_LOG` overrides it.
///
/// sqlx logs every statement at info, so it stays one level quieter than
/// hopper itself.
fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,sqlx=warn",
        2 => "debug,sqlx=info",
        _ => "trace",
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    // stdout carries the feed document, so logs go to stderr
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_keeps_sqlx_quieter() {
        assert_eq!(default_directives(0), "warn");
        assert_eq!(default_directives(1), "info,sqlx=warn");
        assert_eq!(default_directives(7), "trace");
    }
}
