//! Episodes of a webtoon, and how input urls are told apart.

pub mod panels;

use crate::errors::InvalidEpisodeUrl;
use url::Url;

/// A single downloadable episode.
///
/// Built from an episode viewer url such as
/// `https://www.webtoons.com/en/fantasy/tower-of-god/season-1-ep-0/viewer?title_no=95&episode_no=1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub(crate) url: Url,
    pub(crate) title: String,
    pub(crate) number: u32,
    pub(crate) name: String,
}

impl Episode {
    /// The episode viewer url.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The series slug, e.g. `tower-of-god`. Shared by every episode of a series.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The `episode_no` of the episode.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The episode slug, e.g. `season-1-ep-0`.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// What an input url points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// An episode list (`.../{title}/list?title_no=N`) that must be expanded.
    Listing(Url),
    /// A concrete episode.
    Episode(Episode),
}

impl Kind {
    /// Classifies `url` without any network access.
    ///
    /// The path must look like `/{language}/{genre}/{title}/{second}`, where
    /// `second` is either `list` or an episode slug. Episodes must carry a
    /// numeric `episode_no` query.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEpisodeUrl`] if the url is not a `webtoons.com` url of
    /// that shape, or is an episode without a valid `episode_no`.
    pub fn classify(url: &str) -> Result<Self, InvalidEpisodeUrl> {
        let Ok(parsed) = Url::parse(url) else {
            return Err(InvalidEpisodeUrl::new(url, "not a valid url"));
        };

        let host = parsed.host_str().unwrap_or_default();
        if host != "webtoons.com" && !host.ends_with(".webtoons.com") {
            return Err(InvalidEpisodeUrl::new(
                url,
                format!("expected a `webtoons.com` url, but host was `{host}`"),
            ));
        }

        let segments: Vec<String> = parsed
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|segment| !segment.is_empty())
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        // language, genre, title, then `list` or the episode slug.
        let [_language, _genre, title, second, ..] = segments.as_slice() else {
            return Err(InvalidEpisodeUrl::new(
                url,
                "expected a path of `/{language}/{genre}/{title}/{list|episode}`",
            ));
        };

        if *second == "list" {
            return Ok(Self::Listing(parsed));
        }

        let number = match parsed
            .query_pairs()
            .find(|(key, _)| key == "episode_no")
        {
            Some((_, value)) if value.is_empty() => {
                return Err(InvalidEpisodeUrl::new(
                    url,
                    "`episode_no` query was present but had no value",
                ));
            }
            Some((_, value)) => value.parse::<u32>().map_err(|_err| {
                InvalidEpisodeUrl::new(url, format!("`episode_no={value}` is not a valid number"))
            })?,
            None => {
                return Err(InvalidEpisodeUrl::new(
                    url,
                    "episode urls must have an `episode_no` query",
                ));
            }
        };

        Ok(Self::Episode(Episode {
            title: title.clone(),
            name: second.clone(),
            number,
            url: parsed,
        }))
    }
}

/// An inclusive range of episode numbers; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Range {
    /// First episode number to download.
    pub start: Option<u32>,
    /// Last episode number to download.
    pub end: Option<u32>,
}

impl Range {
    /// Whether episode `number` falls inside the range.
    pub fn contains(&self, number: u32) -> bool {
        self.start.is_none_or(|start| number >= start) && self.end.is_none_or(|end| number <= end)
    }
}
