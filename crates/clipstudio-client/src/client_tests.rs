//! Tests for the request executor against a local mock server.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::auth::MemoryTokenStore;
use crate::client::{ApiClient, ApiClientConfig};
use crate::environment::{Environment, EnvironmentProfile};
use crate::error::{ApiError, ErrorCause};
use crate::health::HealthPolicy;
use crate::types::{MultipartBody, RequestDescriptor};

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config(server: &MockServer) -> ApiClientConfig {
    let profile = EnvironmentProfile::for_environment(Environment::Test)
        .with_base_url(&server.uri())
        .expect("mock server uri is absolute")
        .with_timeout(Duration::from_millis(500));
    ApiClientConfig::new(profile).with_probe_timeout(Duration::from_millis(200))
}

fn test_client(server: &MockServer) -> ApiClient {
    ApiClient::new(test_config(server)).unwrap()
}

async fn mount_healthy(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(server)
        .await;
}

// =============================================================================
// Health Gating
// =============================================================================

#[tokio::test]
async fn test_unreachable_backend_skips_main_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/story/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let start = Instant::now();
    let err = client
        .post::<_, Value>("/api/story/generate", &json!({"prompt": "p"}))
        .await
        .unwrap_err();

    assert_eq!(err.cause(), ErrorCause::BackendUnavailable);
    assert!(start.elapsed() < Duration::from_secs(2));
    assert!(!client.is_reachable());
}

#[tokio::test]
async fn test_slow_probe_fails_within_probe_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let start = Instant::now();
    let err = client.get::<Value>("/api/tts/voices").await.unwrap_err();

    assert!(matches!(err, ApiError::BackendUnavailable(_)));
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_while_reachable_policy_stays_down_until_probed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_healthy(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/tts/voices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = ApiClient::new(
        test_config(&server).with_health_policy(HealthPolicy::WhileReachable),
    )
    .unwrap();

    // First request probes and finds the backend down.
    assert!(client.get::<Value>("/api/tts/voices").await.is_err());
    // The backend recovered, but the gate does not re-probe on its own.
    assert!(client.get::<Value>("/api/tts/voices").await.is_err());

    assert!(client.probe().await);
    let voices: Value = client.get("/api/tts/voices").await.unwrap();
    assert_eq!(voices, json!([]));
}

// =============================================================================
// Request Building
// =============================================================================

#[tokio::test]
async fn test_json_request_headers_and_body() {
    let server = MockServer::start().await;
    mount_healthy(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/image/generate"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({"prompt": "cat"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "u"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server)
        .with_token_store(Arc::new(MemoryTokenStore::with_token("secret")));
    let client = ApiClient::new(config).unwrap();

    let body: Value = client
        .post("/api/image/generate", &json!({"prompt": "cat"}))
        .await
        .unwrap();
    assert_eq!(body, json!({"url": "u"}));
}

#[tokio::test]
async fn test_multipart_request_gets_boundary_content_type() {
    let server = MockServer::start().await;
    mount_healthy(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/video/upload"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"file_path": "uploads/a.mp4"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let descriptor = RequestDescriptor::post("/api/video/upload").with_multipart(
        MultipartBody::new()
            .file("file", "a.mp4", "video/mp4", vec![0, 1, 2])
            .text("title", "A"),
    );

    let body = client.request(descriptor).await.unwrap();
    assert_eq!(body["file_path"], "uploads/a.mp4");
}

// =============================================================================
// Response Handling
// =============================================================================

#[tokio::test]
async fn test_http_error_carries_detail_message() {
    let server = MockServer::start().await;
    mount_healthy(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/video/v1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Video not found"})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.delete::<Value>("/api/video/v1").await.unwrap_err();

    assert_eq!(err.http_status(), Some(404));
    assert_eq!(err.message(), "Video not found");
    assert_eq!(err.cause(), ErrorCause::HttpError);
}

#[tokio::test]
async fn test_http_error_without_json_uses_generic_message() {
    let server = MockServer::start().await;
    mount_healthy(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/image/saved"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.get::<Value>("/api/image/saved").await.unwrap_err();

    assert_eq!(err.message(), "HTTP error 502");
}

#[tokio::test]
async fn test_slow_main_request_times_out() {
    let server = MockServer::start().await;
    mount_healthy(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/story/generate"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .post::<_, Value>("/api/story/generate", &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Timeout(_)));
}

#[tokio::test]
async fn test_empty_and_invalid_bodies() {
    let server = MockServer::start().await;
    mount_healthy(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/image/a1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/image/saved"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server);

    let empty = client
        .request(RequestDescriptor::delete("/api/image/a1"))
        .await
        .unwrap();
    assert_eq!(empty, Value::Null);

    let err = client.get::<Value>("/api/image/saved").await.unwrap_err();
    assert_eq!(err.cause(), ErrorCause::Decode);
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    // Bind and drop a server to get a port nothing listens on.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let profile = EnvironmentProfile::for_environment(Environment::Test)
        .with_base_url(&uri)
        .unwrap();
    let client = ApiClient::new(ApiClientConfig::new(profile)).unwrap();

    let err = client.get::<Value>("/api/tts/voices").await.unwrap_err();
    assert_eq!(err.cause(), ErrorCause::BackendUnavailable);
}
