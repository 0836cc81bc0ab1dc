//! Internal request and response types for the AnkiConnect protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The AnkiConnect API version spoken by this client.
pub(crate) const API_VERSION: u8 = 6;

/// The request format expected by AnkiConnect.
#[derive(Debug, Serialize)]
pub(crate) struct AnkiRequest<'a> {
    /// The action to perform.
    pub action: &'a str,
    /// The API version (always 6).
    pub version: u8,
    /// Optional API key for authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'a str>,
    /// Optional parameters for the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'a Value>,
}

impl<'a> AnkiRequest<'a> {
    pub fn new(action: &'a str, params: Option<&'a Value>, key: Option<&'a str>) -> Self {
        Self {
            action,
            version: API_VERSION,
            key,
            params,
        }
    }
}

/// The response envelope returned by AnkiConnect.
#[derive(Debug, Deserialize)]
pub(crate) struct AnkiResponse {
    /// The result of the action; `null` for void actions.
    #[serde(default)]
    pub result: Value,
    /// The error message, if the action failed.
    #[serde(default)]
    pub error: Option<String>,
}
