//! Miscellaneous AnkiConnect actions.

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to miscellaneous AnkiConnect operations.
///
/// Obtained via [`AnkiClient::misc()`].
#[derive(Debug)]
pub struct MiscActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

impl<'a> MiscActions<'a> {
    /// Get the AnkiConnect API version.
    ///
    /// This is useful for verifying that AnkiConnect is running and accessible.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ankijp::AnkiClient;
    ///
    /// # async fn example() -> ankijp::Result<()> {
    /// let client = AnkiClient::new();
    /// let version = client.misc().version().await?;
    /// assert_eq!(version, 6);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn version(&self) -> Result<u32> {
        self.client.invoke_without_params("version").await
    }
}
