//! The AnkiConnect client and builder.

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::actions::{DeckActions, MiscActions, ModelActions, NoteActions};
use crate::error::{Error, Result};
use crate::request::{AnkiRequest, AnkiResponse};

/// Default URL for AnkiConnect.
pub const DEFAULT_URL: &str = "http://localhost:8765";

/// Default timeout for a single HTTP request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of additional attempts after a failed call.
pub const DEFAULT_RETRIES: u32 = 3;

/// Default pause between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// The main client for interacting with AnkiConnect.
///
/// Every call goes through [`AnkiClient::call`], which retries failed
/// attempts with a fixed delay before giving up.
///
/// # Example
///
/// ```no_run
/// use ankijp::AnkiClient;
///
/// # async fn example() -> ankijp::Result<()> {
/// let client = AnkiClient::new();
///
/// client.ping().await?;
/// let version = client.misc().version().await?;
/// println!("AnkiConnect version: {}", version);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AnkiClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    retries: u32,
    retry_delay: Duration,
    retry_remote_errors: bool,
}

impl AnkiClient {
    /// Create a new client with default settings.
    ///
    /// Connects to `http://localhost:8765` with a 30 second timeout,
    /// 3 retries and a 1 second delay between attempts.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for custom client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Access deck operations.
    pub fn decks(&self) -> DeckActions<'_> {
        DeckActions { client: self }
    }

    /// Access model (note type) operations.
    pub fn models(&self) -> ModelActions<'_> {
        ModelActions { client: self }
    }

    /// Access note operations.
    pub fn notes(&self) -> NoteActions<'_> {
        NoteActions { client: self }
    }

    /// Access miscellaneous operations.
    pub fn misc(&self) -> MiscActions<'_> {
        MiscActions { client: self }
    }

    /// Check that AnkiConnect answers a `version` request.
    pub async fn ping(&self) -> Result<()> {
        self.call("version", None).await.map(|_| ())
    }

    /// Perform one action and return its raw `result`.
    ///
    /// Sends `{action, version: 6, params}` and decodes the `{result, error}`
    /// envelope. A failed attempt (transport error, non-200 status, malformed
    /// body, or a non-null `error`) is retried up to the configured number of
    /// times with a fixed delay. When every attempt fails the last error is
    /// wrapped in [`Error::RetriesExhausted`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ankijp::AnkiClient;
    /// # async fn example() -> ankijp::Result<()> {
    /// let client = AnkiClient::new();
    /// let decks = client
    ///     .call("deckNames", None)
    ///     .await?;
    /// println!("{}", decks);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call(&self, action: &str, params: Option<Value>) -> Result<Value> {
        let request = AnkiRequest::new(action, params.as_ref(), self.api_key.as_deref());
        let attempts = self.retries + 1;
        let mut attempt = 1;

        loop {
            match self.send_request(&request).await {
                Ok(result) => return Ok(result),
                Err(err) if !self.is_retryable(&err) => return Err(err),
                Err(err) if attempt >= attempts => {
                    warn!(action, attempts, error = %err, "Giving up on AnkiConnect request");
                    return Err(Error::RetriesExhausted {
                        attempts,
                        source: Box::new(err),
                    });
                }
                Err(err) => {
                    warn!(action, attempt, attempts, error = %err, "AnkiConnect request failed, retrying");
                    attempt += 1;
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }

    /// Execute an action with parameters and decode its result.
    pub(crate) async fn invoke<P, R>(&self, action: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params)?;
        let result = self.call(action, Some(params)).await?;
        decode_result(action, result)
    }

    /// Execute an action without parameters and decode its result.
    pub(crate) async fn invoke_without_params<R>(&self, action: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let result = self.call(action, None).await?;
        decode_result(action, result)
    }

    /// Execute an action whose result is not needed.
    pub(crate) async fn invoke_void<P>(&self, action: &str, params: P) -> Result<()>
    where
        P: Serialize,
    {
        let params = serde_json::to_value(params)?;
        self.call(action, Some(params)).await.map(|_| ())
    }

    fn is_retryable(&self, err: &Error) -> bool {
        match err {
            Error::AnkiConnect(_) => self.retry_remote_errors,
            Error::Json(_) | Error::UnexpectedResult { .. } => false,
            _ => true,
        }
    }

    /// Send a single attempt to AnkiConnect and unwrap the envelope.
    async fn send_request(&self, request: &AnkiRequest<'_>) -> Result<Value> {
        debug!(action = request.action, url = %self.base_url, "Sending AnkiConnect request");

        let response = self
            .http_client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let anki_response: AnkiResponse = serde_json::from_slice(&body).map_err(Error::Decode)?;

        match anki_response.error {
            Some(err) => Err(Error::AnkiConnect(err)),
            None => Ok(anki_response.result),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            return Error::Timeout(self.base_url.clone());
        }
        if err.is_connect() {
            let chain = error_chain(&err).to_lowercase();
            if chain.contains("dns error")
                || chain.contains("failed to lookup")
                || chain.contains("no such host")
            {
                return Error::HostNotFound(self.base_url.clone());
            }
            return Error::ConnectionRefused(self.base_url.clone());
        }
        Error::Http(err)
    }
}

impl Default for AnkiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_result<R: DeserializeOwned>(action: &str, result: Value) -> Result<R> {
    serde_json::from_value(result).map_err(|source| Error::UnexpectedResult {
        action: action.to_string(),
        source,
    })
}

/// Flatten an error and its sources into one message.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Builder for creating a customized [`AnkiClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use ankijp::AnkiClient;
///
/// let client = AnkiClient::builder()
///     .url("http://localhost:8765")
///     .timeout(Duration::from_secs(60))
///     .retries(5)
///     .retry_delay(Duration::from_millis(500))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    retries: u32,
    retry_delay: Duration,
    retry_remote_errors: bool,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            retry_remote_errors: true,
        }
    }

    /// Set the AnkiConnect URL.
    ///
    /// Defaults to `http://localhost:8765`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key for authentication.
    ///
    /// Only required if AnkiConnect is configured to require an API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the per-request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Set how many additional attempts follow a failed one.
    ///
    /// Defaults to 3. Zero disables retrying.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the pause between attempts.
    ///
    /// Defaults to 1 second.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Whether errors reported by AnkiConnect itself are retried.
    ///
    /// Defaults to `true`. A rejected duplicate note fails the same way on
    /// every attempt, so callers that only want transport failures retried
    /// can turn this off.
    pub fn retry_remote_errors(mut self, retry: bool) -> Self {
        self.retry_remote_errors = retry;
        self
    }

    /// Build the client.
    pub fn build(self) -> AnkiClient {
        let http_client = Client::builder()
            .timeout(self.timeout)
            .build()
            .expect("Failed to build HTTP client");

        AnkiClient {
            http_client,
            base_url: self.base_url,
            api_key: self.api_key,
            retries: self.retries,
            retry_delay: self.retry_delay,
            retry_remote_errors: self.retry_remote_errors,
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
