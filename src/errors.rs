//! Errors that can happen when downloading from `webtoons.com`.

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

#[allow(missing_docs)]
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ClientBuilderError {
    #[error("failed to build the underlying http client")]
    BuildFailed,
}

/// A single request that did not produce usable data.
///
/// Nothing is retried: a transport error or a non-success status is final for
/// that request.
#[allow(missing_docs)]
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("`{url}` responded with {status}")]
    Status { url: Url, status: StatusCode },
}

/// Represents a url that is neither an episode nor an episode list on `webtoons.com`.
///
/// Like the other url errors, this is a message carrier that says which
/// expectation the url violated.
#[derive(Debug, Error)]
#[error("`{url}` could not be parsed: {reason}")]
pub struct InvalidEpisodeUrl {
    url: String,
    reason: String,
}

impl InvalidEpisodeUrl {
    pub(crate) fn new(url: &str, reason: impl Into<String>) -> Self {
        Self {
            url: url.to_owned(),
            reason: reason.into(),
        }
    }

    /// The url as it was given.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[allow(missing_docs)]
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("failed to fetch listing page: {0}")]
    Request(#[from] RequestError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[allow(missing_docs)]
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("failed to fetch episode page: {0}")]
    Request(#[from] RequestError),
    #[error("Failed to find any panels for episode")]
    NoPanelsFound,
    #[error("none of the {0} panels of the episode could be downloaded")]
    NoPanelsDownloaded(usize),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[allow(missing_docs)]
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    ZipError(#[from] zip::result::ZipError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
