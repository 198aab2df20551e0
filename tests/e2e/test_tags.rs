use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_context::test_context;

fn script_ids(body: &Value) -> Vec<&str> {
    body["scripts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect()
}

fn command_names(log: &Value) -> Vec<&str> {
    log.as_array()
        .unwrap()
        .iter()
        .map(|c| c[0].as_str().unwrap())
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_ga_without_a_measurement_id(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/tags/bootstrap?path=/articles/1.html&title=Race%20report")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("cache-control", "no-store");

    let body = response.body.as_ref().unwrap();
    assert_eq!(script_ids(body), vec!["piano-xbuilder", "cxense-hochi"]);
    assert_eq!(body["dataLayer"], json!([]));

    assert_eq!(
        body["scripts"][0]["src"],
        "https://experience-ap.piano.io/xbuilder/experience/load?aid=TESTAID"
    );
    assert_eq!(
        command_names(&body["tp"]),
        vec![
            "setAid",
            "setSandbox",
            "setEndpoint",
            "setPianoIdUrl",
            "setEspEndpoint",
            "setUseTinypassAccounts",
            "setUsePianoIdUserProvider",
            "setUsePianoIdLiteUserProvider",
            "init",
            "setTags",
        ]
    );
    assert_eq!(body["tp"][1], json!(["setSandbox", true]));
    assert_eq!(body["tp"][9], json!(["setTags", ["Race report", "/articles/1.html"]]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forward_the_external_jwt(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/tags/bootstrap?path=/&jwt=eyJ.test.sig")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let tp = &response.body.as_ref().unwrap()["tp"];
    assert_eq!(tp[5], json!(["setExternalJWT", "eyJ.test.sig"]));
    // Without a title the path doubles as the tag
    assert_eq!(tp.as_array().unwrap().last().unwrap(), &json!(["setTags", ["/", "/"]]));
}

#[tokio::test]
async fn it_should_queue_ga_and_adsense_when_configured() {
    let ctx = TestContext::start(|c, _| {
        c.tags.ga_id = Some("G-E2E".to_string());
        c.tags.adsense_client = Some("ca-pub-0000".to_string());
    })
    .await;

    let response = ctx
        .client
        .get_with_headers(
            "/api/tags/bootstrap?path=/articles/2.html&title=T",
            &[("x-forwarded-proto", "https")],
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(
        script_ids(body),
        vec!["ga4-lib", "piano-xbuilder", "cxense-hochi", "adsbygoogle-js"]
    );
    assert_eq!(command_names(&body["dataLayer"]), vec!["js", "config", "event"]);
    assert_eq!(body["dataLayer"][1], json!(["config", "G-E2E", { "send_page_view": false }]));

    let page_view = &body["dataLayer"][2][2];
    assert_eq!(page_view["page_path"], "/articles/2.html");
    assert_eq!(page_view["page_title"], "T");
    assert_eq!(page_view["send_to"], "G-E2E");
    let location = page_view["page_location"].as_str().unwrap();
    assert!(location.starts_with("https://127.0.0.1:"), "{}", location);
    assert!(location.ends_with("/articles/2.html"));

    assert_eq!(body["scripts"][3]["crossorigin"], "anonymous");
}
