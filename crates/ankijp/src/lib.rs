//! An async AnkiConnect client for pushing flashcards into Anki.
//!
//! This crate wraps the single-action JSON protocol spoken by the AnkiConnect
//! add-on: one `{action, version, params}` POST per call, one
//! `{result, error}` envelope back. Failed calls are retried with a fixed
//! delay.
//!
//! # Quick Start
//!
//! ```no_run
//! use ankijp::{AnkiClient, NoteBuilder};
//!
//! # async fn example() -> ankijp::Result<()> {
//! // Create a client with default settings (localhost:8765)
//! let client = AnkiClient::new();
//!
//! // Check that AnkiConnect is running
//! client.ping().await?;
//!
//! client.decks().ensure_exists("日文動詞").await?;
//! let note = NoteBuilder::new("日文動詞", "Japanese Verb")
//!     .field("核心單字", "飲む")
//!     .build();
//! let id = client.notes().add(note).await?;
//! println!("Created note {}", id);
//! # Ok(())
//! # }
//! ```
//!
//! # Client Configuration
//!
//! Use the builder pattern for custom configuration:
//!
//! ```no_run
//! use std::time::Duration;
//! use ankijp::AnkiClient;
//!
//! let client = AnkiClient::builder()
//!     .url("http://localhost:8765")
//!     .timeout(Duration::from_secs(60))
//!     .retries(5)
//!     .build();
//! ```
//!
//! # Action Groups
//!
//! - [`AnkiClient::decks()`] - List, check and create decks
//! - [`AnkiClient::models()`] - Inspect, create and update note types
//! - [`AnkiClient::notes()`] - Add single notes or batches
//! - [`AnkiClient::misc()`] - Version check
//!
//! Connection diagnostics live in [`status`].

pub mod actions;
pub mod client;
pub mod error;
mod request;
pub mod status;
pub mod types;

pub use actions::{DeckActions, MiscActions, ModelActions, NoteActions, REJECTED_NOTE_ID};
pub use client::{AnkiClient, ClientBuilder};
pub use error::{Error, Result};
pub use status::{ConnectionStatus, Diagnosis, format_error};
pub use types::{CreateCardTemplate, CreateModelParams, Note, NoteBuilder, NoteOptions};
