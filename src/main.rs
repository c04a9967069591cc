//! Command line entry point of `webtoon-dl`.

use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use webtoon_dl::{
    ClientBuilder, Range,
    archive::{Mode, Options},
    download::{self, Settings},
};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so `--help` works without any logging set up.
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(args.log_level()))
        .with_target(false)
        .init();

    tracing::debug!(?args, "arguments parsed");

    let output = match args.output {
        Some(output) => output,
        None => std::env::current_dir().context("failed to resolve the current directory")?,
    };

    let settings = Settings {
        archive: Options {
            mode: if args.raw { Mode::Raw } else { Mode::Archive },
            output,
            numbered: args.number,
        },
        range: Range {
            start: args.start,
            end: args.end,
        },
    };

    let mut builder = ClientBuilder::new();
    if let Some(secs) = args.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build()?;

    download::run(&client, &args.urls, &settings).await;

    Ok(())
}
