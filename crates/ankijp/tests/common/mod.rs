//! Common test utilities for AnkiConnect tests.

use std::time::Duration;

use ankijp::AnkiClient;
use serde::Serialize;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a client for the mock server that does not retry.
#[allow(dead_code)]
pub fn client_for_mock(server: &MockServer) -> AnkiClient {
    AnkiClient::builder()
        .url(server.uri())
        .retries(0)
        .retry_delay(Duration::ZERO)
        .build()
}

/// Create a successful AnkiConnect response.
pub fn mock_anki_response<T: Serialize>(result: T) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": result,
        "error": null
    }))
}

/// Create an error AnkiConnect response.
#[allow(dead_code)] // Not all test files use this
pub fn mock_anki_error(error: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": null,
        "error": error
    }))
}

/// Mount a mock for a specific action (expect exactly 1 call).
pub async fn mock_action(server: &MockServer, action: &str, response: ResponseTemplate) {
    mock_action_times(server, action, response, 1).await;
}

/// Mount a mock for a specific action with expected call count.
pub async fn mock_action_times(
    server: &MockServer,
    action: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": action,
            "version": 6
        })))
        .respond_with(response)
        .expect(Times::from(times))
        .mount(server)
        .await;
}
