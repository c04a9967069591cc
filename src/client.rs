//! Represents a client abstraction for `webtoons.com`.

use crate::{
    errors::{ClientBuilderError, RequestError},
    stdx::http::{DEFAULT_USER_AGENT, default_headers},
};
use reqwest::header::REFERER;
use std::{future::Future, time::Duration};
use url::Url;

/// Fetches documents and images.
///
/// [`Client`] is the implementation that talks to the network. Everything that
/// walks pages is written against this trait rather than [`Client`] directly.
pub trait Fetch {
    /// Fetches the document at `url` and returns its body.
    fn html(&self, url: &Url) -> impl Future<Output = Result<String, RequestError>> + Send;

    /// Fetches binary data at `url`, sending `referer` as the `Referer` header.
    ///
    /// The image host rejects requests that don't come from a matching episode page.
    fn image(
        &self,
        url: &Url,
        referer: &Url,
    ) -> impl Future<Output = Result<Vec<u8>, RequestError>> + Send;
}

/// A builder for configuring and creating instances of [`Client`] with custom settings.
///
/// Every client it builds attaches the fixed consent cookies to every request.
///
/// # Example
///
/// ```
/// # use webtoon_dl::client::ClientBuilder;
/// # use std::time::Duration;
/// let client = ClientBuilder::new()
///     .user_agent("custom-agent/1.0")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok::<(), webtoon_dl::errors::ClientBuilderError>(())
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    builder: reqwest::ClientBuilder,
}

impl Default for ClientBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    ///
    /// This includes a default user agent (`$CARGO_PKG_NAME/$CARGO_PKG_VERSION`) and the consent cookies.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        let builder = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(default_headers())
            .use_rustls_tls()
            .brotli(true);

        Self { builder }
    }

    /// Sets a custom `User-Agent` header for the [`Client`].
    #[inline]
    #[must_use]
    pub fn user_agent(self, user_agent: &str) -> Self {
        let builder = self.builder.user_agent(user_agent);
        Self { builder }
    }

    /// Sets a timeout for each whole request. Without one the transport default applies.
    #[inline]
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        let builder = self.builder.timeout(timeout);
        Self { builder }
    }

    /// Consumes the `ClientBuilder` and returns a fully-configured [`Client`].
    ///
    /// # Errors
    ///
    /// Returns a [`ClientBuilderError`] if the underlying HTTP client could not be built,
    /// such as when TLS initialization fails or the DNS resolver cannot load the system configuration.
    #[inline]
    pub fn build(self) -> Result<Client, ClientBuilderError> {
        Ok(Client {
            http: self
                .builder
                .build()
                .map_err(|_err| ClientBuilderError::BuildFailed)?,
        })
    }
}

/// An asynchronous client for `webtoons.com`.
///
/// It is cheap to clone and reuses its connection pool across every request
/// of a run.
///
/// # Example
///
/// ```
/// # use webtoon_dl::client::Client;
/// let client = Client::new();
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Instantiates a new [`Client`] with the default configuration.
    ///
    /// # Panics
    ///
    /// This function will panic if the TLS backend cannot be initialized or if the DNS resolver
    /// fails to load the system's configuration. For a `Result` use [`ClientBuilder`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        #[expect(
            clippy::expect_used,
            reason = "it is documented that this can panic and that `ClientBuilder` should be used instead for a `Result`"
        )]
        ClientBuilder::new().build().expect("Client::new()")
    }

    /// Returns a [`ClientBuilder`] for creating a custom-configured `Client`.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    async fn get(
        &self,
        url: &Url,
        referer: Option<&Url>,
    ) -> Result<reqwest::Response, RequestError> {
        let mut request = self.http.get(url.as_str());

        if let Some(referer) = referer {
            request = request.header(REFERER, referer.as_str());
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status {
                url: url.clone(),
                status,
            });
        }

        Ok(response)
    }
}

impl Fetch for Client {
    async fn html(&self, url: &Url) -> Result<String, RequestError> {
        tracing::trace!(%url, "GET document");
        let text = self.get(url, None).await?.text().await?;
        Ok(text)
    }

    async fn image(&self, url: &Url, referer: &Url) -> Result<Vec<u8>, RequestError> {
        tracing::trace!(%url, %referer, "GET image");
        let bytes = self.get(url, Some(referer)).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod mock;
