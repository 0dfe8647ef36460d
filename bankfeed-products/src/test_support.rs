//! Shared wiremock scaffolding for fetcher tests.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bankfeed_fetch::{ApiClient, ApiConfig, PollPolicy};

/// Builds a client pointed at the mock server.
pub(crate) fn test_client(server: &MockServer) -> ApiClient {
    let config = ApiConfig::new("test-client-id", "test-secret").with_base_url(server.uri());
    ApiClient::new(config).unwrap()
}

/// A poll policy that never sleeps, for fast tests.
pub(crate) fn zero_delay(max_attempts: u32) -> PollPolicy {
    PollPolicy::new(max_attempts).with_delay(Duration::ZERO)
}

/// A "still computing" response carrying `code`.
pub(crate) fn not_ready(code: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "error_code": code,
        "error_message": "the requested product is not yet ready",
    }))
}

/// Mounts the sandbox link and exchange endpoints with fixed tokens.
pub(crate) async fn mount_sandbox_link(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/sandbox/public_token/create"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "public_token": "public-sandbox-test",
            })),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/item/public_token/exchange"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "access-sandbox-test",
                "item_id": "item-test",
            })),
        )
        .mount(server)
        .await;
}

/// Mounts a plain POST endpoint returning `body` as JSON.
pub(crate) async fn mount_json(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
