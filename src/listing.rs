//! Resolves episode lists into the episodes they link to.
//!
//! `webtoons.com` paginates lists in blocks: a page shows a strip of up to ten
//! sibling pages, and a `pg_next` link to the first page of the next block.
//! Asking for a page past the end does not fail, it just serves the last page
//! again, so the only end marker is a page without a `pg_next` link.

use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeSet, HashMap, HashSet};
use url::Url;

use crate::{client::Fetch, errors::ListingError, stdx::http::absolute};

/// What a single fetched list page links to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Page {
    /// Sibling pages of the same block.
    strip: Vec<Url>,
    /// First page of the next block.
    next: Option<Url>,
    /// Episodes listed on this page.
    episodes: Vec<Url>,
}

impl Page {
    fn parse(html: &str, url: &Url) -> Self {
        let html = Html::parse_document(html);

        let strip_selector = Selector::parse(".paginate a[href]") //
            .expect("`.paginate a[href]` should be a valid selector");
        let next_selector = Selector::parse("a.pg_next[href]") //
            .expect("`a.pg_next[href]` should be a valid selector");
        let episodes_selector = Selector::parse("#_listUl a[href]") //
            .expect("`#_listUl a[href]` should be a valid selector");

        let strip = html
            .select(&strip_selector)
            .filter(|a| !has_class(a, "pg_next") && !has_class(a, "pg_prev"))
            .filter_map(|a| href(a, url))
            .collect();

        let next = html
            .select(&next_selector)
            .next()
            .and_then(|a| href(a, url));

        let episodes = html
            .select(&episodes_selector)
            .filter_map(|a| href(a, url))
            .collect();

        Self {
            strip,
            next,
            episodes,
        }
    }
}

fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

fn href(element: ElementRef<'_>, base: &Url) -> Option<Url> {
    absolute(base, element.value().attr("href")?)
}

/// Returns every episode url reachable from the list at `url`.
///
/// Any page number or other trailing query in `url` is dropped first, so the
/// walk always starts at page one. Every distinct page is fetched once.
///
/// # Errors
///
/// If any page of the list fails to fetch, the whole list fails with
/// [`ListingError::Request`] rather than returning a partial list.
pub async fn resolve<F: Fetch>(fetcher: &F, url: &Url) -> Result<Vec<Url>, ListingError> {
    let mut pages: HashMap<Url, Page> = HashMap::new();
    let mut blocks: HashSet<Url> = HashSet::new();

    let mut next = Some(first_page(url));

    while let Some(url) = next.take() {
        if !blocks.insert(url.clone()) {
            tracing::debug!(%url, "`pg_next` points back to a visited page, stopping");
            break;
        }

        let block = visit(fetcher, &mut pages, &url).await?;

        for sibling in &block.strip {
            visit(fetcher, &mut pages, sibling).await?;
        }

        next = block.next;
    }

    tracing::debug!(pages = pages.len(), "walked list pages");

    let episodes: BTreeSet<Url> = pages
        .into_values()
        .flat_map(|page| page.episodes)
        .collect();

    Ok(episodes.into_iter().collect())
}

async fn visit<F: Fetch>(
    fetcher: &F,
    pages: &mut HashMap<Url, Page>,
    url: &Url,
) -> Result<Page, ListingError> {
    if let Some(page) = pages.get(url) {
        return Ok(page.clone());
    }

    let html = fetcher.html(url).await?;
    let page = Page::parse(&html, url);

    pages.insert(url.clone(), page.clone());

    Ok(page)
}

/// `url` with only its first query pair, e.g. `title_no=95`, and no fragment.
pub(crate) fn first_page(url: &Url) -> Url {
    let mut first = url.clone();
    first.set_fragment(None);

    match url.query_pairs().next() {
        Some((key, value)) => {
            first.query_pairs_mut().clear().append_pair(&key, &value);
        }
        None => first.set_query(None),
    }

    first
}
