use crate::e2e::helpers;

use helpers::upstream::{PRIMARY_IP, SECONDARY_IP};
use helpers::{TestContext, SPA_ORIGIN};
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_the_primary_provider_answer(ctx: &TestContext) {
    let response = ctx.client.get("/news-api/_diag/ip").await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("cache-control", "no-store");

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["ip"], PRIMARY_IP);
    assert_eq!(body["source"], "ipify");
    assert!(body["ts"].is_string());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn it_should_fall_back_to_the_secondary_provider() {
    let ctx = TestContext::start(|c, up| c.diag_ip_primary_url = up.url("/ip-fail")).await;

    let response = ctx.client.get("/news-api/_diag/ip").await.unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["ip"], SECONDARY_IP);
    assert_eq!(body["source"], "checkip");
}

#[tokio::test]
async fn it_should_report_unreachable_when_both_providers_fail() {
    let ctx = TestContext::start(|c, up| {
        c.diag_ip_primary_url = up.url("/ip-fail");
        c.diag_ip_secondary_url = up.url("/ip-fail");
    })
    .await;

    let response = ctx.client.get("/news-api/_diag/ip").await.unwrap();
    response
        .assert_status(StatusCode::OK)
        .assert_header("cache-control", "no-store");

    let body = response.body.as_ref().unwrap();
    assert!(body["ip"].is_null());
    assert_eq!(body["error"], "unreachable");
    assert!(body.get("source").is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_sit_behind_the_cors_gate(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers("/news-api/_diag/ip", &[("origin", SPA_ORIGIN)])
        .await
        .unwrap();

    response.assert_header("access-control-allow-origin", SPA_ORIGIN);
}
