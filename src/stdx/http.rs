use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use url::Url;

pub static DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Cookies that make `webtoons.com` skip its age and consent interstitials.
pub static CONSENT_COOKIES: &[(&str, &str)] = &[
    ("needCCPA", "false"),
    ("needCOPPA", "false"),
    ("needGDPR", "false"),
];

/// Headers attached to every request the client makes.
pub fn default_headers() -> HeaderMap {
    let cookie = CONSENT_COOKIES
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ");

    let mut headers = HeaderMap::new();

    // Only ascii is ever joined here.
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.insert(COOKIE, value);
    }

    headers
}

/// Resolves `href` against `base`, dropping any `#fragment`.
///
/// `webtoons.com` marks the current paginator entry with `href="#"`, which
/// then resolves back to the page itself instead of some new page.
pub fn absolute(base: &Url, href: &str) -> Option<Url> {
    let mut url = base.join(href).ok()?;
    url.set_fragment(None);
    Some(url)
}
