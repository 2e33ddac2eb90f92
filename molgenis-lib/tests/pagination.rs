//! Page following, partial delivery and cancellation against a mock server.

use futures::StreamExt;
use molgenis_lib::Filter;
use molgenis_lib::MolgenisClient;
use molgenis_lib::auth::TOKEN_HEADER;
use molgenis_lib::model::Entity;
use molgenis_lib::model::Row;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;
use wiremock::matchers::query_param_is_missing;

const TOTAL: usize = 250;
const PAGE: usize = 100;

#[derive(Debug, Serialize, Deserialize)]
struct Sample {
    id: String,
    #[serde(default)]
    label: Option<String>,
}

impl Entity for Sample {
    const ENTITY_NAME: &'static str = "demo_samples";

    fn id(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.id.clone())
    }
}

fn page_body(start: usize) -> Value {
    let end = (start + PAGE).min(TOTAL);
    let items: Vec<Value> = (start..end)
        .map(|i| json!({ "id": format!("s{i}"), "label": format!("Sample {i}") }))
        .collect();
    let mut body = json!({
        "href": format!("/api/v2/demo_samples?start={start}&num={PAGE}"),
        "meta": { "name": "demo_samples" },
        "start": start,
        "num": PAGE,
        "total": TOTAL,
        "items": items,
    });
    if end < TOTAL {
        body["nextHref"] = json!(format!("/api/v2/demo_samples?start={end}&num={PAGE}"));
    }
    body
}

async fn mount_first_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/demo_samples"))
        .and(query_param_is_missing("start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0)))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, start: usize, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/api/v2/demo_samples"))
        .and(query_param("start", start.to_string()))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_all_pages(server: &MockServer) {
    mount_first_page(server).await;
    mount_page(server, 100, ResponseTemplate::new(200).set_body_json(page_body(100)), 1).await;
    mount_page(server, 200, ResponseTemplate::new(200).set_body_json(page_body(200)), 1).await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

#[tokio::test]
async fn streams_every_item_across_three_pages() {
    let server = MockServer::start().await;
    mount_all_pages(&server).await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let samples = client
        .query::<Sample>()
        .page_size(PAGE as u32)
        .collect_all()
        .await
        .unwrap();

    assert_eq!(samples.len(), TOTAL);
    assert_eq!(samples[0].id, "s0");
    assert_eq!(samples[249].id, "s249");
    assert!(samples.iter().enumerate().all(|(i, s)| s.id == format!("s{i}")));
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn page_iterator_reports_envelopes() {
    let server = MockServer::start().await;
    mount_all_pages(&server).await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let mut pages = client.query::<Sample>().page_size(PAGE as u32).pages();

    let mut sizes = Vec::new();
    while let Some(page) = pages.next().await {
        let page = page.unwrap();
        assert_eq!(page.total(), TOTAL as u64);
        sizes.push(page.len());
    }

    assert_eq!(sizes, vec![100, 100, 50]);
    assert!(pages.is_done());
    assert!(pages.next().await.is_none());
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn next_page_is_fetched_lazily() {
    let server = MockServer::start().await;
    mount_all_pages(&server).await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let mut stream = client.query::<Sample>().stream();

    for _ in 0..PAGE {
        stream.next().await.unwrap().unwrap();
    }
    assert_eq!(request_count(&server).await, 1);

    stream.next().await.unwrap().unwrap();
    assert_eq!(request_count(&server).await, 2);

    let rest: Vec<_> = stream.collect().await;
    assert_eq!(rest.len(), TOTAL - PAGE - 1);
}

#[tokio::test]
async fn decode_failure_on_second_page_keeps_first_page() {
    let server = MockServer::start().await;
    mount_first_page(&server).await;
    mount_page(&server, 100, ResponseTemplate::new(200).set_body_string("{\"items\": oops"), 1).await;
    mount_page(&server, 200, ResponseTemplate::new(200).set_body_json(page_body(200)), 0).await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let mut stream = client.query::<Sample>().stream();

    let mut delivered = 0;
    let mut error = None;
    while let Some(item) = stream.next().await {
        match item {
            Ok(_) => delivered += 1,
            Err(e) => {
                error = Some(e);
                break;
            }
        }
    }

    assert_eq!(delivered, 100);
    assert!(error.unwrap().is_decode());
    assert!(stream.next().await.is_none());
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn http_error_on_second_page_ends_stream() {
    let server = MockServer::start().await;
    mount_first_page(&server).await;
    mount_page(&server, 100, ResponseTemplate::new(500), 1).await;
    mount_page(&server, 200, ResponseTemplate::new(200).set_body_json(page_body(200)), 0).await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let results: Vec<_> = client.query::<Sample>().stream().collect().await;

    assert_eq!(results.len(), 101);
    assert!(results[..100].iter().all(Result::is_ok));
    assert_eq!(results[100].as_ref().unwrap_err().status_code(), Some(500));
}

#[tokio::test]
async fn collect_all_returns_the_page_error() {
    let server = MockServer::start().await;
    mount_first_page(&server).await;
    mount_page(&server, 100, ResponseTemplate::new(200).set_body_string("not json"), 1).await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let err = client.query::<Sample>().collect_all().await.unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn body_without_page_envelope_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/demo_samples"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"href": "/api/v2/demo_samples", "id": "x"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let results: Vec<_> = client.query::<Sample>().stream().collect().await;
    assert_eq!(results.len(), 1);
    assert!(results[0].as_ref().unwrap_err().is_decode());

    let err = client.query::<Sample>().collect_all().await.unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn cancelling_stops_further_page_requests() {
    let server = MockServer::start().await;
    mount_first_page(&server).await;
    mount_page(&server, 100, ResponseTemplate::new(200).set_body_json(page_body(100)), 0).await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let mut stream = client.query::<Sample>().stream();

    for _ in 0..10 {
        stream.next().await.unwrap().unwrap();
    }
    stream.cancel();

    assert!(stream.next().await.is_none());
    assert!(stream.next().await.is_none());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn external_token_cancels_the_stream() {
    let server = MockServer::start().await;
    mount_first_page(&server).await;
    mount_page(&server, 100, ResponseTemplate::new(200).set_body_json(page_body(100)), 0).await;

    let token = CancellationToken::new();
    let client = MolgenisClient::new(server.uri()).unwrap();
    let mut stream = client.query::<Sample>().cancel_on(token.clone()).stream();

    stream.next().await.unwrap().unwrap();
    token.cancel();

    assert!(stream.next().await.is_none());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn dropping_the_stream_stops_page_requests() {
    let server = MockServer::start().await;
    mount_first_page(&server).await;
    mount_page(&server, 100, ResponseTemplate::new(200).set_body_json(page_body(100)), 0).await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let mut stream = client.query::<Sample>().stream();
    stream.next().await.unwrap().unwrap();
    drop(stream);

    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn pages_pick_up_a_login_made_mid_stream() {
    let server = MockServer::start().await;
    mount_all_pages(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "admin",
            "token": "tok-mid",
        })))
        .mount(&server)
        .await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let mut pages = client.query::<Sample>().pages();

    pages.next().await.unwrap().unwrap();
    assert!(client.authenticate("admin", "secret").await);
    while let Some(page) = pages.next().await {
        page.unwrap();
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    assert!(requests[0].headers.get(TOKEN_HEADER).is_none());
    assert!(requests[1].headers.get(TOKEN_HEADER).is_none());
    assert_eq!(requests[2].headers.get(TOKEN_HEADER).unwrap(), "tok-mid");
    assert_eq!(requests[3].headers.get(TOKEN_HEADER).unwrap(), "tok-mid");
}

#[tokio::test]
async fn query_parameters_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/demo_samples"))
        .and(query_param("q", "label=like=Sample"))
        .and(query_param("attrs", "id,label"))
        .and(query_param("num", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": "/api/v2/demo_samples",
            "start": 0,
            "num": 5,
            "total": 1,
            "items": [{ "id": "s1", "label": "Sample 1" }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let rows = client
        .query_as::<Row>("demo_samples")
        .filter(Filter::like("label", "Sample"))
        .attrs(&["id", "label"])
        .page_size(5)
        .collect_all()
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_str("label"), Some("Sample 1"));
}

#[tokio::test]
async fn absolute_next_links_are_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/demo_samples"))
        .and(query_param_is_missing("start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": "/api/v2/demo_samples",
            "start": 0,
            "num": 1,
            "total": 2,
            "nextHref": format!("{}/api/v2/demo_samples?start=1&num=1", server.uri()),
            "items": [{ "id": "s0" }],
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/demo_samples"))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": "/api/v2/demo_samples?start=1&num=1",
            "start": 1,
            "num": 1,
            "total": 2,
            "items": [{ "id": "s1" }],
        })))
        .mount(&server)
        .await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let samples = client.query::<Sample>().collect_all().await.unwrap();
    assert_eq!(samples.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), ["s0", "s1"]);
}

#[tokio::test]
async fn single_row_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/demo_samples/s7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_href": "/api/v2/demo_samples/s7",
            "id": "s7",
            "label": "Sample 7",
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/demo_samples/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Unknown entity"))
        .mount(&server)
        .await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let sample = client.get::<Sample>("s7").await.unwrap();
    assert_eq!(sample.label(), "Sample 7");

    let err = client.get::<Sample>("missing").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}
