use clap::Parser;
use std::path::PathBuf;

/// Webtoons.com comic downloader.
///
/// Saves comics as CBZ archives or folders of images, one per episode.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// Url of a webtoons.com episode, episode list or creator gallery. Multiple urls may be given.
    #[arg(required = true, value_name = "URL")]
    pub(crate) urls: Vec<String>,

    /// Save image files to a folder instead of a CBZ archive.
    #[arg(short, long)]
    pub(crate) raw: bool,

    /// Path to the output directory. Defaults to the current directory.
    #[arg(short, long, value_name = "DIR")]
    pub(crate) output: Option<PathBuf>,

    /// Add the episode number to the file name. Useful when episode names are not numbered.
    #[arg(short, long)]
    pub(crate) number: bool,

    /// Episode number from which the download should start.
    #[arg(short, long)]
    pub(crate) start: Option<u32>,

    /// Episode number which should be downloaded last.
    #[arg(short, long)]
    pub(crate) end: Option<u32>,

    /// Request timeout in seconds. Defaults to no timeout beyond the transport's own.
    #[arg(long, value_name = "SECS")]
    pub(crate) timeout: Option<u64>,

    /// More output; repeat for even more (-vv).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub(crate) verbose: u8,

    /// Only print errors.
    #[arg(short, long)]
    pub(crate) quiet: bool,
}

impl Args {
    /// Log filter directive for the chosen verbosity.
    pub(crate) fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }

        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
