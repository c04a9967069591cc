//! Turns a mix of episode and list urls into an ordered download queue.

use std::collections::{HashSet, VecDeque};
use url::Url;

use crate::{
    client::Fetch,
    episode::{Episode, Kind},
    listing,
};

/// Builds the sorted, deduplicated list of episodes that `urls` point at.
///
/// Every input url is classified before anything is fetched, so malformed
/// input is reported up front. Lists are then expanded through a work queue;
/// whatever a list links to is classified and queued in turn. An episode is
/// queued once per `(title, number, name)`, however its query is ordered, and
/// a list is walked once per first page, which also stops a list that links
/// back to itself.
///
/// Nothing here fails the whole batch: unparseable urls and lists that fail to
/// resolve are logged and skipped.
///
/// The result is ordered by `(title, number)`.
pub async fn build<F, S>(fetcher: &F, urls: &[S]) -> Vec<Episode>
where
    F: Fetch,
    S: AsRef<str>,
{
    let mut lists: HashSet<Url> = HashSet::new();
    let mut queued: HashSet<(String, u32, String)> = HashSet::new();
    let mut pending: VecDeque<Kind> = VecDeque::new();

    for url in urls {
        let url = url.as_ref();
        match Kind::classify(url) {
            Ok(kind) => pending.push_back(kind),
            Err(err) => tracing::warn!("{err}"),
        }
    }

    let mut episodes = Vec::new();

    while let Some(kind) = pending.pop_front() {
        match kind {
            Kind::Episode(episode) => {
                let key = (
                    episode.title().to_owned(),
                    episode.number(),
                    episode.name().to_owned(),
                );

                if queued.insert(key) {
                    episodes.push(episode);
                }
            }
            Kind::Listing(url) => {
                if !lists.insert(listing::first_page(&url)) {
                    continue;
                }

                tracing::info!("fetching episodes from {url}");

                let found = match listing::resolve(fetcher, &url).await {
                    Ok(found) => found,
                    Err(err) => {
                        tracing::warn!(%url, "skipping list: {err}");
                        continue;
                    }
                };

                tracing::debug!(%url, found = found.len(), "resolved list");

                for url in found {
                    match Kind::classify(url.as_str()) {
                        Ok(kind) => pending.push_back(kind),
                        Err(err) => tracing::warn!("{err}"),
                    }
                }
            }
        }
    }

    sort(&mut episodes);

    episodes
}

/// Stable sort by `(title, number)`.
pub(crate) fn sort(episodes: &mut [Episode]) {
    episodes.sort_by(|a, b| (a.title(), a.number()).cmp(&(b.title(), b.number())));
}
