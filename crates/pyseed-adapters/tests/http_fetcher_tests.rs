//! HttpFetcher against a local mock server.

use std::net::TcpListener;
use std::time::Duration;

use pyseed_adapters::{HttpFetcher, HttpSettings};
use pyseed_core::{
    application::{ApplicationError, FetchPolicy, ports::RemoteFetcher, services::fetch_with_retry},
    error::{PyseedError, PyseedResult},
};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GITIGNORE_BODY: &str = "# Byte-compiled / optimized / DLL files\n__pycache__/\n*.py[cod]\n";

/// The blocking client must not live on the async runtime's threads.
async fn fetch_blocking(url: String, settings: HttpSettings) -> PyseedResult<String> {
    tokio::task::spawn_blocking(move || HttpFetcher::new(&settings)?.fetch(&url))
        .await
        .expect("fetch task panicked")
}

async fn fetch(url: String) -> PyseedResult<String> {
    fetch_blocking(url, HttpSettings::default()).await
}

#[tokio::test]
async fn body_is_returned_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Python.gitignore"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GITIGNORE_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let body = fetch(format!("{}/Python.gitignore", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, GITIGNORE_BODY);
}

#[tokio::test]
async fn not_found_is_reported_as_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetch(format!("{}/missing", server.uri())).await.unwrap_err();

    assert!(matches!(
        err,
        PyseedError::Application(ApplicationError::HttpStatus { status: 404, .. })
    ));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn server_error_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = fetch(format!("{}/.dockerignore", server.uri()))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
}

#[tokio::test]
async fn invalid_utf8_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/binary"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x66, 0x6f, 0xff, 0xfe]))
        .mount(&server)
        .await;

    let err = fetch(format!("{}/binary", server.uri())).await.unwrap_err();

    assert!(matches!(
        err,
        PyseedError::Application(ApplicationError::DecodeFailed { .. })
    ));
}

#[tokio::test]
async fn refused_connection_is_a_retryable_fetch_failure() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = fetch(format!("http://127.0.0.1:{port}/.gitignore"))
        .await
        .unwrap_err();

    match err {
        PyseedError::Application(ApplicationError::FetchFailed { retryable, .. }) => {
            assert!(retryable)
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(GITIGNORE_BODY)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let settings = HttpSettings {
        timeout: Duration::from_millis(200),
        ..HttpSettings::default()
    };
    let err = fetch_blocking(format!("{}/slow", server.uri()), settings)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PyseedError::Application(ApplicationError::FetchFailed {
            retryable: true,
            ..
        })
    ));
}

#[tokio::test]
async fn retry_policy_recovers_from_one_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.dockerignore"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/.dockerignore"))
        .respond_with(ResponseTemplate::new(200).set_body_string("venv/\n"))
        .mount(&server)
        .await;

    let url = format!("{}/.dockerignore", server.uri());
    let body = tokio::task::spawn_blocking(move || {
        let fetcher = HttpFetcher::new(&HttpSettings::default())?;
        fetch_with_retry(
            &fetcher,
            &url,
            FetchPolicy {
                retries: 1,
                backoff: Duration::ZERO,
            },
        )
    })
    .await
    .expect("fetch task panicked")
    .unwrap();

    assert_eq!(body, "venv/\n");
}
