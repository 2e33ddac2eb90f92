//! Login, logout and header propagation against a mock MOLGENIS server.

use std::time::Duration;

use molgenis_lib::MolgenisClient;
use molgenis_lib::auth::TOKEN_HEADER;
use molgenis_lib::error::AuthError;
use molgenis_lib::error::ConfigError;
use molgenis_lib::error::Error;
use molgenis_lib::model::Row;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_json;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;

async fn mount_login(server: &MockServer, password: &str, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_partial_json(json!({ "password": password })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "admin",
            "firstname": "Ada",
            "lastname": "Lovelace",
            "token": token,
        })))
        .mount(server)
        .await;
}

async fn mount_rejected_login(server: &MockServer, password: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_partial_json(json!({ "password": password })))
        .respond_with(ResponseTemplate::new(401).set_body_string("Login failed"))
        .mount(server)
        .await;
}

async fn mount_empty_collection(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": "/api/v2/demo",
            "start": 0,
            "num": 100,
            "total": 0,
            "items": [],
        })))
        .mount(server)
        .await;
}

async fn last_request_token(server: &MockServer) -> Option<String> {
    let requests = server.received_requests().await.unwrap();
    requests
        .last()
        .unwrap()
        .headers
        .get(TOKEN_HEADER)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn login_sends_credentials_and_installs_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(header("content-type", "application/json;charset=UTF-8"))
        .and(body_json(json!({ "username": "admin", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "admin",
            "token": "tok-1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    assert!(client.authenticate("admin", "secret").await);
    assert!(client.is_authenticated());
    assert_eq!(client.current_user().unwrap().username, "admin");
    assert_eq!(
        client.current_auth_headers().get(TOKEN_HEADER).unwrap(),
        "tok-1"
    );
}

#[tokio::test]
async fn token_is_sent_after_login_and_not_after_logout() {
    let server = MockServer::start().await;
    mount_login(&server, "secret", "tok-1").await;
    mount_empty_collection(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/logout"))
        .and(header(TOKEN_HEADER, "tok-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = MolgenisClient::new(server.uri()).unwrap();

    client.query_as::<Row>("demo").collect_all().await.unwrap();
    assert_eq!(last_request_token(&server).await, None);

    assert!(client.authenticate("admin", "secret").await);
    client.query_as::<Row>("demo").collect_all().await.unwrap();
    assert_eq!(last_request_token(&server).await.as_deref(), Some("tok-1"));

    assert!(client.deauthenticate().await);
    assert!(!client.is_authenticated());
    client.query_as::<Row>("demo").collect_all().await.unwrap();
    assert_eq!(last_request_token(&server).await, None);
}

#[tokio::test]
async fn failed_login_keeps_previous_token() {
    let server = MockServer::start().await;
    mount_login(&server, "secret", "tok-1").await;
    mount_rejected_login(&server, "wrong").await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    assert!(client.authenticate("admin", "secret").await);

    assert!(!client.authenticate("admin", "wrong").await);
    assert_eq!(
        client.current_auth_headers().get(TOKEN_HEADER).unwrap(),
        "tok-1"
    );

    let err = client.try_authenticate("admin", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(client.current_user().unwrap().username, "admin");
}

#[tokio::test]
async fn login_never_carries_the_current_token() {
    let server = MockServer::start().await;
    mount_login(&server, "first", "tok-1").await;
    mount_login(&server, "second", "tok-2").await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    assert!(client.authenticate("admin", "first").await);
    assert!(client.authenticate("admin", "second").await);

    assert_eq!(last_request_token(&server).await, None);
    assert_eq!(
        client.current_auth_headers().get(TOKEN_HEADER).unwrap(),
        "tok-2"
    );
}

#[tokio::test]
async fn undecodable_login_response_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let err = client.try_authenticate("admin", "secret").await.unwrap_err();
    assert!(matches!(err, AuthError::Parse(_)));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn server_error_on_login_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let err = client.try_authenticate("admin", "secret").await.unwrap_err();
    assert!(matches!(err, AuthError::Rejected { status: 503 }));
}

#[tokio::test]
async fn failed_logout_still_clears_token() {
    let server = MockServer::start().await;
    mount_login(&server, "secret", "tok-1").await;
    Mock::given(method("POST"))
        .and(path("/api/v1/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    assert!(client.authenticate("admin", "secret").await);

    assert!(!client.deauthenticate().await);
    assert!(!client.is_authenticated());
    assert!(client.current_auth_headers().get(TOKEN_HEADER).is_none());
}

#[tokio::test]
async fn clones_share_the_session() {
    let server = MockServer::start().await;
    mount_login(&server, "secret", "tok-1").await;

    let client = MolgenisClient::new(server.uri()).unwrap();
    let clone = client.clone();
    assert!(client.authenticate("admin", "secret").await);
    assert!(clone.is_authenticated());
}

#[tokio::test]
async fn slow_login_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "username": "admin", "token": "tok-1" }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = MolgenisClient::builder()
        .url(server.uri())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = client.try_authenticate("admin", "secret").await.unwrap_err();
    assert!(matches!(err, AuthError::Timeout(_)));
    assert!(!client.is_authenticated());
}

#[test]
fn base_url_with_path_is_a_config_error() {
    let result = MolgenisClient::new("http://localhost:8080/molgenis/");
    assert!(matches!(result, Err(Error::Config(ConfigError::BasePath { .. }))));
}
