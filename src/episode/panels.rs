//! Page images of an episode.

use scraper::{Html, Selector};
use url::Url;

use super::Episode;
use crate::{client::Fetch, errors::EpisodeError};

/// Downloads every panel of `episode`, in reading order.
///
/// A panel that fails to download is left out, so the returned list is
/// compacted: index `0` is always the first panel that *was* fetched.
///
/// # Errors
///
/// Returns [`EpisodeError::Request`] if the episode page itself could not be
/// fetched, [`EpisodeError::NoPanelsFound`] if it contained no panels, and
/// [`EpisodeError::NoPanelsDownloaded`] if every panel failed.
pub async fn download<F: Fetch>(fetcher: &F, episode: &Episode) -> Result<Vec<Vec<u8>>, EpisodeError> {
    let html = fetcher.html(episode.url()).await?;

    let urls = from_html(&html, episode.url());

    if urls.is_empty() {
        return Err(EpisodeError::NoPanelsFound);
    }

    tracing::info!(
        "{} #{}: {} - found {} pages",
        episode.title(),
        episode.number(),
        episode.name(),
        urls.len()
    );

    let total = urls.len();
    let mut panels = Vec::with_capacity(total);

    for (index, url) in urls.iter().enumerate() {
        tracing::info!("downloading page {}/{total}", index + 1);

        match fetcher.image(url, episode.url()).await {
            Ok(bytes) => panels.push(bytes),
            Err(err) => tracing::warn!(%url, "skipping page {}/{total}: {err}", index + 1),
        }
    }

    if panels.is_empty() {
        return Err(EpisodeError::NoPanelsDownloaded(total));
    }

    Ok(panels)
}

/// Extracts the full quality panel urls of an episode page, in document order.
///
/// The real location is in `data-url`; `src` is a lazy-loading placeholder.
fn from_html(html: &str, episode: &Url) -> Vec<Url> {
    let html = Html::parse_document(html);

    let selector = Selector::parse(r"img._images") //
        .expect("`img._images` should be a valid selector");

    let mut urls = Vec::new();

    for img in html.select(&selector) {
        let Some(data_url) = img.value().attr("data-url") else {
            tracing::warn!(%episode, "`img._images` without a `data-url`, skipping");
            continue;
        };

        let Ok(url) = episode.join(data_url.trim()) else {
            tracing::warn!(%episode, data_url, "`data-url` is not a valid url, skipping");
            continue;
        };

        urls.push(full_quality(url));
    }

    urls
}

/// Removes the `type` query, e.g. `?type=q90`, which serves a downscaled image.
fn full_quality(mut url: Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "type")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    url
}
