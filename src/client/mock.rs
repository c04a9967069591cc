use super::Fetch;
use crate::errors::RequestError;
use parking_lot::Mutex;
use reqwest::StatusCode;
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone)]
enum Reply {
    Html(String),
    Image(Vec<u8>),
    Status(StatusCode),
}

/// An in-memory site: urls map to canned replies, anything else is a `404`.
///
/// Every request is logged so tests can count fetches.
#[derive(Debug, Default)]
pub(crate) struct MockFetch {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<Request>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Request {
    pub(crate) url: String,
    pub(crate) referer: Option<String>,
}

impl MockFetch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn html(mut self, url: &str, body: impl Into<String>) -> Self {
        self.replies.insert(url.to_owned(), Reply::Html(body.into()));
        self
    }

    pub(crate) fn image(mut self, url: &str, bytes: &[u8]) -> Self {
        self.replies.insert(url.to_owned(), Reply::Image(bytes.to_vec()));
        self
    }

    pub(crate) fn status(mut self, url: &str, status: StatusCode) -> Self {
        self.replies.insert(url.to_owned(), Reply::Status(status));
        self
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// How many times `url` was requested.
    pub(crate) fn hits(&self, url: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.url == url)
            .count()
    }

    fn reply(&self, url: &Url, referer: Option<&Url>) -> Result<Reply, RequestError> {
        self.requests.lock().push(Request {
            url: url.to_string(),
            referer: referer.map(ToString::to_string),
        });

        match self.replies.get(url.as_str()) {
            Some(Reply::Status(status)) => Err(RequestError::Status {
                url: url.clone(),
                status: *status,
            }),
            Some(reply) => Ok(reply.clone()),
            None => Err(RequestError::Status {
                url: url.clone(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}

impl Fetch for MockFetch {
    async fn html(&self, url: &Url) -> Result<String, RequestError> {
        match self.reply(url, None)? {
            Reply::Html(body) => Ok(body),
            Reply::Image(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Reply::Status(_) => unreachable!("statuses are returned as errors by `reply`"),
        }
    }

    async fn image(&self, url: &Url, referer: &Url) -> Result<Vec<u8>, RequestError> {
        match self.reply(url, Some(referer))? {
            Reply::Image(bytes) => Ok(bytes),
            Reply::Html(body) => Ok(body.into_bytes()),
            Reply::Status(_) => unreachable!("statuses are returned as errors by `reply`"),
        }
    }
}
