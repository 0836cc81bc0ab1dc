//! Deck-related AnkiConnect actions.
//!
//! # Example
//!
//! ```no_run
//! use ankijp::AnkiClient;
//!
//! # async fn example() -> ankijp::Result<()> {
//! let client = AnkiClient::new();
//!
//! // Create the deck only when it is missing
//! let created = client.decks().ensure_exists("日文動詞").await?;
//! println!("created: {}", created);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use tracing::info;

use crate::client::AnkiClient;
use crate::error::Result;

/// Provides access to deck-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::decks()`].
#[derive(Debug)]
pub struct DeckActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct CreateDeckParams<'a> {
    deck: &'a str,
}

impl<'a> DeckActions<'a> {
    /// Get all deck names.
    pub async fn names(&self) -> Result<Vec<String>> {
        self.client.invoke_without_params("deckNames").await
    }

    /// Create a new deck.
    ///
    /// Returns the ID of the created deck. AnkiConnect returns the existing
    /// ID when the deck already exists.
    pub async fn create(&self, name: &str) -> Result<i64> {
        self.client
            .invoke("createDeck", CreateDeckParams { deck: name })
            .await
    }

    /// Check whether a deck exists.
    ///
    /// The comparison is an exact, case-sensitive match on the full name.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        let names = self.names().await?;
        Ok(names.iter().any(|deck| deck == name))
    }

    /// Create the deck if it does not exist yet.
    ///
    /// Returns `true` when a deck was created.
    pub async fn ensure_exists(&self, name: &str) -> Result<bool> {
        if self.exists(name).await? {
            return Ok(false);
        }

        let deck_id = self.create(name).await?;
        info!(deck = name, deck_id, "Created deck");
        Ok(true)
    }
}
