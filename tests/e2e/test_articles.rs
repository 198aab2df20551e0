use crate::e2e::helpers;

use helpers::assertions::{assert_page_envelope, assert_summary_shape};
use helpers::fixtures::PAGE_ONE_COUNT;
use helpers::TestContext;
use hyper::StatusCode;
use news_edge::infrastructure::config::Environment;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_every_upstream_article_in_order(ctx: &TestContext) {
    let response = ctx.client.get("/api/articles").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_page_envelope(body);
    assert_eq!(body["page"], 1);
    assert_eq!(body["perPage"], 12);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["total"], 15);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), PAGE_ONE_COUNT);
    items.iter().for_each(assert_summary_shape);

    assert_eq!(
        items[0],
        json!({
            "id": "20240101-OHT1T50000",
            "title": "記事 0",
            "summary": "本文 0 二行目",
            "publishedAt": "2024-01-01T18:04:05Z",
            "updatedAt": "2024-01-01T19:00:00Z",
            "image": {
                "src": "https://hochi.news/photo/0/s1.jpg",
                "width": 640,
                "height": 360,
                "alt": ""
            },
            "url": "/articles/20240101-OHT1T50000.html"
        })
    );
    assert!(items[1].get("image").is_none(), "odd articles carry no image");
    assert_eq!(items[11]["id"], "20240103-OHT1T50011");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_apply_limit_after_projection(ctx: &TestContext) {
    let response = ctx.client.get("/api/articles?limit=5").await.unwrap();
    response.assert_status(StatusCode::OK);

    let items = response.body.as_ref().unwrap()["items"].as_array().unwrap().clone();
    assert_eq!(items.len(), 5);
    assert_eq!(items[4]["id"], "20240105-OHT1T50004");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forward_page_to_upstream(ctx: &TestContext) {
    let response = ctx.client.get("/api/articles?page=2").await.unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["page"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
    assert_eq!(body["items"][0]["id"], "20240104-OHT1T50012");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_ignore_invalid_query_values(ctx: &TestContext) {
    let response = ctx.client.get("/api/articles?page=abc&limit=-4").await.unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["page"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), PAGE_ONE_COUNT);

    let response = ctx.client.get("/api/articles?limit=9999").await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap()["items"].as_array().unwrap().len(),
        PAGE_ONE_COUNT
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_ignore_repeated_query_keys(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/articles?page=2&page=1&limit=2&limit=3")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["page"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), PAGE_ONE_COUNT);

    let response = ctx.client.get("/news-api/news-feed?limit=2&limit=2").await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["items"].as_array().unwrap().len(), 4);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_the_same_body_under_both_prefixes(ctx: &TestContext) {
    let api = ctx.client.get("/api/articles?limit=3").await.unwrap();
    let news_api = ctx.client.get("/news-api/articles?limit=3").await.unwrap();

    api.assert_status(StatusCode::OK);
    news_api.assert_status(StatusCode::OK);
    assert_eq!(api.body, news_api.body);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_cache_outside_production(ctx: &TestContext) {
    let response = ctx.client.get("/api/articles").await.unwrap();
    response.assert_header("cache-control", "no-store");
}

#[tokio::test]
async fn it_should_allow_shared_caching_in_production() {
    let ctx = TestContext::start(|c, _| c.environment = Environment::Production).await;

    let response = ctx.client.get("/api/articles").await.unwrap();
    response
        .assert_status(StatusCode::OK)
        .assert_header("cache-control", "public, s-maxage=60, stale-while-revalidate=30");
}

#[tokio::test]
async fn it_should_return_500_when_upstream_is_not_configured() {
    let ctx = TestContext::start(|c, _| c.news_list_api = None).await;

    let response = ctx.client.get("/api/articles").await.unwrap();
    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_body()
        .assert_header("cache-control", "no-store");
    assert_eq!(ctx.upstream.hits(), 0);
}

#[tokio::test]
async fn it_should_return_502_when_upstream_body_is_not_json() {
    let ctx = TestContext::start(|c, up| c.news_list_api = Some(up.url("/broken-list"))).await;

    let response = ctx.client.get("/api/articles").await.unwrap();
    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_body()
        .assert_header("cache-control", "no-store");

    let message = response.body.as_ref().unwrap()["message"].as_str().unwrap();
    assert!(!message.contains("maintenance"), "upstream body leaked: {}", message);
}

#[tokio::test]
async fn it_should_return_502_when_upstream_fails() {
    let ctx = TestContext::start(|c, up| c.news_list_api = Some(up.url("/failing-list"))).await;

    let response = ctx.client.get("/news-api/articles").await.unwrap();
    response.assert_status(StatusCode::BAD_GATEWAY).assert_error_body();
}

#[tokio::test]
async fn it_should_reuse_cached_upstream_payloads_when_enabled() {
    let ctx = TestContext::start(|c, _| c.upstream_cache_enabled = true).await;

    ctx.client.get("/api/articles").await.unwrap().assert_status(StatusCode::OK);
    ctx.client.get("/news-api/articles?limit=2").await.unwrap().assert_status(StatusCode::OK);
    ctx.client.get("/api/articles?page=2").await.unwrap().assert_status(StatusCode::OK);

    assert_eq!(ctx.upstream.hits(), 2);
}
