//! Tests for miscellaneous actions and connection checks.

mod common;

use ankijp::AnkiClient;
use common::{client_for_mock, mock_action, mock_anki_response, setup_mock_server};

#[tokio::test]
async fn test_version() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;

    let client = client_for_mock(&server);
    let version = client.misc().version().await.unwrap();

    assert_eq!(version, 6);
}

#[tokio::test]
async fn test_check_connection_connected() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;

    let client = client_for_mock(&server);
    let status = client.check_connection().await;

    assert!(status.connected);
    assert_eq!(status.version, Some(6));
    assert!(status.error.is_none());
    assert_eq!(status.url, server.uri());
}

#[tokio::test]
async fn test_check_connection_refused() {
    let client = AnkiClient::builder()
        .url("http://127.0.0.1:1")
        .retries(0)
        .build();
    let status = client.check_connection().await;

    assert!(!status.connected);
    assert!(status.version.is_none());
    assert!(status.error.unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_diagnose_report() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", mock_anki_response(6)).await;

    let client = client_for_mock(&server);
    let report = client.diagnose().await;

    assert!(report.contains("已連線 ✓"));
    assert!(report.contains("Anki Connect 版本: 6"));
}
