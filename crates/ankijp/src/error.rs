//! Error types for the ankijp crate.
//!
//! Failures fall into three families:
//!
//! - **Transport**: [`Error::ConnectionRefused`], [`Error::HostNotFound`],
//!   [`Error::Timeout`], [`Error::Status`] and [`Error::Http`]
//! - **Decode**: [`Error::Decode`], the response body was not a valid
//!   `{result, error}` envelope
//! - **Remote**: [`Error::AnkiConnect`], the envelope carried a non-null `error`
//!
//! All three are retried by [`AnkiClient::call`](crate::AnkiClient::call).
//! Once the attempts run out the last cause is wrapped in
//! [`Error::RetriesExhausted`].
//!
//! # Example
//!
//! ```no_run
//! use ankijp::{AnkiClient, Error};
//!
//! # async fn example() {
//! let client = AnkiClient::new();
//!
//! match client.decks().names().await {
//!     Ok(decks) => println!("Found {} decks", decks.len()),
//!     Err(e) if matches!(e.root_cause(), Error::ConnectionRefused(_)) => {
//!         eprintln!("Please start Anki with AnkiConnect installed");
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use thiserror::Error;

/// The error type for AnkiConnect operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing is listening on the configured endpoint.
    ///
    /// Usually Anki is not running or the AnkiConnect add-on is missing.
    #[error("connection refused by {0}: is Anki running with AnkiConnect installed?")]
    ConnectionRefused(String),

    /// The endpoint host name could not be resolved.
    #[error("no such host: {0}")]
    HostNotFound(String),

    /// The request did not complete within the configured timeout.
    #[error("request to {0} timed out")]
    Timeout(String),

    /// AnkiConnect answered with something other than `200 OK`.
    #[error("unexpected status code: {0}")]
    Status(u16),

    /// Any other HTTP/network error from reqwest.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not a valid `{result, error}` envelope.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// AnkiConnect returned an error message.
    ///
    /// Common messages include:
    /// - "cannot create note because it is a duplicate"
    /// - "model was not found"
    /// - "Model name already exists"
    #[error("AnkiConnect API error: {0}")]
    AnkiConnect(String),

    /// Every attempt failed; `source` is the error from the last one.
    #[error("failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Total number of attempts made, including the first.
        attempts: u32,
        /// The failure of the final attempt.
        source: Box<Error>,
    },

    /// The envelope was well formed but `result` had an unexpected shape.
    ///
    /// For example a non-numeric note ID from `addNote`.
    #[error("unexpected result for '{action}': {source}")]
    UnexpectedResult {
        /// The action whose result could not be decoded.
        action: String,
        /// The decoding failure.
        source: serde_json::Error,
    },

    /// Request parameters could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The underlying failure, looking through [`Error::RetriesExhausted`].
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::RetriesExhausted { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether this error came from the network or HTTP layer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.root_cause(),
            Error::ConnectionRefused(_)
                | Error::HostNotFound(_)
                | Error::Timeout(_)
                | Error::Status(_)
                | Error::Http(_)
        )
    }

    /// The remote error message, if AnkiConnect reported one.
    pub fn remote_message(&self) -> Option<&str> {
        match self.root_cause() {
            Error::AnkiConnect(message) => Some(message),
            _ => None,
        }
    }
}

/// A specialized Result type for AnkiConnect operations.
pub type Result<T> = std::result::Result<T, Error>;
