//! Common test utilities for command tests.

use std::path::PathBuf;

use ankijp_cli::{Cli, commands};
use clap::Parser;
use serde::Serialize;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create a successful AnkiConnect response.
pub fn mock_anki_response<T: Serialize>(result: T) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": result,
        "error": null
    }))
}

/// Create an error AnkiConnect response.
#[allow(dead_code)]
pub fn mock_anki_error(error: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": null,
        "error": error
    }))
}

/// Mount a mock for a specific action (expect exactly 1 call).
#[allow(dead_code)]
pub async fn mock_action(server: &MockServer, action: &str, response: ResponseTemplate) {
    mock_action_times(server, action, response, 1).await;
}

/// Mount a mock for a specific action with expected call count.
#[allow(dead_code)]
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

/// A config file pointing at `url` with retries disabled.
pub struct TestConfig {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestConfig {
    pub fn new(url: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            format!(
                r#"
[anki]
connect_url = "{url}"
deck_name = "日文學習"
timeout_secs = 5
retries = 0
retry_delay_ms = 0

[template]
tags = ["japanese"]
"#
            ),
        )
        .unwrap();
        Self { _dir: dir, path }
    }
}

/// Run the command line against `url` and capture its output.
pub async fn run_cli(url: &str, args: &[&str]) -> (ankijp_cli::Result<()>, String) {
    let config = TestConfig::new(url);
    let config_path = config.path.to_string_lossy().into_owned();

    let mut argv = vec!["anki-japanese-cli", "--config", &config_path, "--url", url];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();

    let mut out = Vec::new();
    let result = commands::run(cli, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}
