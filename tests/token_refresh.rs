//! Integration tests for the token-refresh-and-resume flow.
//!
//! These tests verify:
//! - 401 -> refresh -> resume yields one success and one token-endpoint call
//! - the refreshed pair is persisted before the request resumes
//! - refresh failure and missing credentials are terminal
//! - a second 401 after a successful refresh is terminal

mod helpers;

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{seeded_session, test_client};
use netsuite_client::{EngineError, MemorySession, RequestSpec, RetryStrategy, SessionStore};

const TOKEN_PATH: &str = "/services/rest/auth/oauth2/v1/token";

fn token_endpoint_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": "refreshed-access",
        "refresh_token": "refreshed-refresh",
        "expires_in": 3600,
        "token_type": "Bearer",
    }))
}

#[tokio::test]
async fn test_401_triggers_one_refresh_then_succeeds() {
    let server = MockServer::start().await;

    // The expired token is rejected once
    Mock::given(method("GET"))
        .and(path("/services/rest/record/v1/account"))
        .and(header("Authorization", "Bearer initial-access"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    // Exactly one token exchange, with the expected grant parameters
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=initial-refresh"))
        .and(body_string_contains("client_id=test-client-id"))
        .respond_with(token_endpoint_ok())
        .expect(1)
        .mount(&server)
        .await;

    // The resumed request carries the refreshed token
    Mock::given(method("GET"))
        .and(path("/services/rest/record/v1/account"))
        .and(header("Authorization", "Bearer refreshed-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ACCT"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = seeded_session();
    let client = test_client(&server.uri(), Arc::clone(&session));
    let spec = RequestSpec::get("/services/rest/record/v1/account");

    let result = client
        .single_request(&spec, RetryStrategy::Standard)
        .await
        .expect("refresh-and-resume should succeed");

    assert_eq!(result["id"], "ACCT");

    // The new pair was committed to the session
    let tokens = session.tokens().expect("tokens present");
    assert_eq!(tokens.access_token, "refreshed-access");
    assert_eq!(tokens.refresh_token, "refreshed-refresh");
}

#[tokio::test]
async fn test_failed_refresh_is_terminal_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guarded"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), seeded_session());
    let spec = RequestSpec::get("/guarded");

    let err = client
        .single_request(&spec, RetryStrategy::Standard)
        .await
        .expect_err("failed refresh must be terminal");

    assert!(matches!(&err, EngineError::Auth(_)));
}

#[tokio::test]
async fn test_second_401_after_refresh_is_terminal() {
    let server = MockServer::start().await;

    // The API keeps rejecting even the refreshed token
    Mock::given(method("GET"))
        .and(path("/guarded"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_endpoint_ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), seeded_session());
    let spec = RequestSpec::get("/guarded");

    let err = client
        .single_request(&spec, RetryStrategy::Standard)
        .await
        .expect_err("second 401 must be terminal");

    match err {
        EngineError::Auth(message) => assert!(message.contains("after token refresh")),
        other => panic!("expected Auth, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_tokens_fail_fast_without_network_calls() {
    let server = MockServer::start().await;

    let client = test_client(&server.uri(), Arc::new(MemorySession::empty()));
    let spec = RequestSpec::get("/anything");

    let err = client
        .single_request(&spec, RetryStrategy::Standard)
        .await
        .expect_err("no credentials must fail fast");

    assert!(matches!(&err, EngineError::Auth(_)));
    let received = server.received_requests().await.unwrap_or_default();
    assert!(
        received.is_empty(),
        "no HTTP exchange should have been issued"
    );
}

#[tokio::test]
async fn test_concurrent_401s_share_a_single_refresh() {
    let server = MockServer::start().await;

    // Both in-flight calls are rejected on the stale token; a small delay
    // keeps them in flight together so they race into the refresh path
    Mock::given(method("GET"))
        .and(path("/guarded"))
        .and(header("Authorization", "Bearer initial-access"))
        .respond_with(ResponseTemplate::new(401).set_delay(std::time::Duration::from_millis(50)))
        .expect(1..=2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/guarded"))
        .and(header("Authorization", "Bearer refreshed-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(2)
        .mount(&server)
        .await;
    // The single-flight gate allows exactly one token exchange
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_endpoint_ok())
        .expect(1)
        .mount(&server)
        .await;

    let session = seeded_session();
    let client = Arc::new(test_client(&server.uri(), Arc::clone(&session)));
    let spec = RequestSpec::get("/guarded");

    let first = {
        let client = Arc::clone(&client);
        let spec = spec.clone();
        tokio::spawn(async move { client.single_request(&spec, RetryStrategy::Standard).await })
    };
    let second = {
        let client = Arc::clone(&client);
        let spec = spec.clone();
        tokio::spawn(async move { client.single_request(&spec, RetryStrategy::Standard).await })
    };

    let (first, second) = tokio::join!(first, second);
    assert!(first.expect("task").is_ok());
    assert!(second.expect("task").is_ok());
}

#[tokio::test]
async fn test_429_retry_reuses_the_same_token_without_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/throttled"))
        .and(header("Authorization", "Bearer initial-access"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/throttled"))
        .and(header("Authorization", "Bearer initial-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    // No token exchange on the 429 path
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(token_endpoint_ok())
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), seeded_session());
    let spec = RequestSpec::get("/throttled");

    let result = client
        .single_request(&spec, RetryStrategy::Standard)
        .await
        .expect("429 retry should succeed");
    assert_eq!(result["ok"], true);
}
