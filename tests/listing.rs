use webtoon_dl::{Client, Fetch, errors::RequestError, listing};
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param, query_param_is_missing},
};

const COOKIES: &str = "needCCPA=false; needCOPPA=false; needGDPR=false";

fn episode(number: u32) -> String {
    format!(
        "https://www.webtoons.com/en/drama/a/ep-{number}/viewer?title_no=1&episode_no={number}"
    )
}

fn list_page(strip: &[u32], next: Option<u32>, episodes: &[u32]) -> String {
    let mut paginate: String = strip
        .iter()
        .map(|page| format!(r#"<a href="/en/drama/a/list?title_no=1&page={page}">{page}</a>"#))
        .collect();

    if let Some(next) = next {
        paginate += &format!(
            r#"<a href="/en/drama/a/list?title_no=1&page={next}" class="pg_next">Next</a>"#
        );
    }

    let items: String = episodes
        .iter()
        .map(|number| format!(r#"<li><a href="{}">{number}</a></li>"#, episode(*number)))
        .collect();

    format!(r#"<ul id="_listUl">{items}</ul><div class="paginate">{paginate}</div>"#)
}

#[tokio::test]
async fn should_send_consent_cookies() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doc"))
        .and(header("cookie", COOKIES))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new();
    let body = client
        .html(&Url::parse(&format!("{}/doc", server.uri()))?)
        .await?;

    assert_eq!("<html></html>", body);

    Ok(())
}

#[tokio::test]
async fn should_send_referer_for_images() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let referer = Url::parse(&episode(1))?;

    Mock::given(method("GET"))
        .and(path("/001.jpg"))
        .and(header("referer", referer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new();
    let bytes = client
        .image(&Url::parse(&format!("{}/001.jpg", server.uri()))?, &referer)
        .await?;

    assert_eq!(b"jpeg".to_vec(), bytes);

    Ok(())
}

#[tokio::test]
async fn should_fail_on_error_status() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = Client::new();
    let result = client
        .html(&Url::parse(&format!("{}/missing", server.uri()))?)
        .await;

    assert!(
        matches!(result, Err(RequestError::Status { status, .. }) if status.as_u16() == 500),
        "500 should be a status error: {result:?}"
    );

    Ok(())
}

#[tokio::test]
async fn should_resolve_paginated_list_over_http() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    // Block one is pages 1 and 2, block two is page 3 alone.
    Mock::given(method("GET"))
        .and(path("/en/drama/a/list"))
        .and(query_param("title_no", "1"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_string(list_page(&[2], Some(3), &[1, 2])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/en/drama/a/list"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(list_page(&[], Some(3), &[3])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/en/drama/a/list"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(list_page(&[], None, &[4])))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new();
    let list = Url::parse(&format!("{}/en/drama/a/list?title_no=1&page=2", server.uri()))?;

    let episodes = listing::resolve(&client, &list).await?;

    let mut expected: Vec<String> = (1..=4).map(episode).collect();
    expected.sort();
    let found: Vec<String> = episodes.into_iter().map(String::from).collect();
    assert_eq!(expected, found);

    Ok(())
}

#[tokio::test]
async fn should_fail_list_when_a_page_fails() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/en/drama/a/list"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_string(list_page(&[2], None, &[1])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/en/drama/a/list"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = Client::new();
    let list = Url::parse(&format!("{}/en/drama/a/list?title_no=1", server.uri()))?;

    let result = listing::resolve(&client, &list).await;

    assert!(result.is_err(), "a failed page must fail the whole list");

    Ok(())
}
