#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::unwrap_used, reason = "integration test, panics are the assertion mechanism")]

use anisync_client::{ClientConfig, HttpSender};
use anisync_core::{accept_success, RequestSender, ResponseValidator};
use anisync_types::{Credential, Form, PushError, PushRequest, PushResponse};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{basic_auth, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(server: &MockServer, route: &str, credential: Credential) -> PushRequest {
    let form: Form = [("status", "completed"), ("episodes_watched", "26")].into_iter().collect();
    PushRequest {
        url: format!("{}{}", server.uri(), route),
        form,
        credential,
    }
}

fn sender() -> HttpSender {
    HttpSender::new(&ClientConfig::default()).unwrap()
}

#[tokio::test]
async fn test_batch_success_sends_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/libraries/1"))
        .and(body_string_contains("auth_token=s3cret"))
        .and(body_string_contains("status=completed"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/libraries/2/remove"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let token = Credential::token("s3cret");
    let requests = vec![
        request(&server, "/api/v1/libraries/1", token.clone()),
        request(&server, "/api/v1/libraries/2/remove", token),
    ];

    sender()
        .send_many(requests, Duration::from_secs(5), accept_success())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_basic_credential_uses_http_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/animelist/update/21.xml"))
        .and(basic_auth("darin", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Updated"))
        .expect(1)
        .mount(&server)
        .await;

    let requests = vec![request(
        &server,
        "/api/animelist/update/21.xml",
        Credential::basic("darin", "hunter2"),
    )];
    let body_check: ResponseValidator = Arc::new(|response: &PushResponse| {
        if response.body == "Updated" {
            Ok(())
        } else {
            Err(format!("unexpected body {:?}", response.body))
        }
    });

    sender()
        .send_many(requests, Duration::from_secs(5), body_check)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_validator_rejection_fails_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let token = Credential::token("t");
    let requests = vec![
        request(&server, "/ok", token.clone()),
        request(&server, "/missing", token),
    ];
    let err = sender()
        .send_many(requests, Duration::from_secs(5), accept_success())
        .await
        .unwrap_err();

    match err {
        PushError::BatchRequestFailed { message } => assert!(message.contains("404")),
        other => panic!("expected request failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_request_times_out_whole_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fast"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let token = Credential::token("t");
    let requests = vec![
        request(&server, "/fast", token.clone()),
        request(&server, "/slow", token),
    ];
    let err = sender()
        .send_many(requests, Duration::from_millis(200), accept_success())
        .await
        .unwrap_err();

    assert_eq!(err, PushError::BatchTimeout { timeout_ms: 200 });
}

#[tokio::test]
async fn test_empty_batch_is_ok() {
    sender()
        .send_many(Vec::new(), Duration::from_millis(1), accept_success())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unreachable_host_is_request_failure() {
    let requests = vec![PushRequest {
        url: "http://127.0.0.1:9/x".to_string(),
        form: Form::new(),
        credential: Credential::token("t"),
    }];
    let err = sender()
        .send_many(requests, Duration::from_secs(5), accept_success())
        .await
        .unwrap_err();
    assert!(matches!(err, PushError::BatchRequestFailed { .. }));
}
