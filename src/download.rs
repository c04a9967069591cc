//! Runs a whole batch: build the queue, then fetch and save each episode in turn.

use crate::{
    archive::{self, Options},
    client::Fetch,
    episode::{Range, panels},
    queue,
};

/// Everything a run needs besides the urls and the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Where and how episodes are written.
    pub archive: Options,
    /// Episodes outside this range are skipped.
    pub range: Range,
}

/// What happened to the queued episodes of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Episodes written to disk.
    pub saved: usize,
    /// Episodes outside the requested range.
    pub skipped: usize,
    /// Episodes that could not be downloaded or written.
    pub failed: usize,
}

/// Downloads every episode reachable from `urls`, one after another.
///
/// Failures are per episode: they are logged, counted in the [`Summary`] and
/// the run moves on to the next episode.
pub async fn run<F, S>(fetcher: &F, urls: &[S], settings: &Settings) -> Summary
where
    F: Fetch,
    S: AsRef<str>,
{
    tracing::info!("looking for comics...");
    let episodes = queue::build(fetcher, urls).await;
    tracing::info!("found {} episodes", episodes.len());

    let mut summary = Summary::default();

    for episode in &episodes {
        if !settings.range.contains(episode.number()) {
            tracing::info!(
                "skipping {} #{}: {}",
                episode.title(),
                episode.number(),
                episode.name()
            );
            summary.skipped += 1;
            continue;
        }

        let pages = match panels::download(fetcher, episode).await {
            Ok(pages) => pages,
            Err(err) => {
                tracing::error!(url = %episode.url(), "failed to download episode: {err}");
                summary.failed += 1;
                continue;
            }
        };

        tracing::info!("saving episode...");

        match archive::save(episode, &pages, &settings.archive).await {
            Ok(path) => {
                tracing::debug!(path = %path.display(), pages = pages.len(), "saved episode");
                summary.saved += 1;
            }
            Err(err) => {
                tracing::error!(url = %episode.url(), "failed to save episode: {err}");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        saved = summary.saved,
        skipped = summary.skipped,
        failed = summary.failed,
        "done! all episodes downloaded"
    );

    summary
}
