//! Note-related AnkiConnect actions.
//!
//! # Example
//!
//! ```no_run
//! use ankijp::{AnkiClient, NoteBuilder};
//!
//! # async fn example() -> ankijp::Result<()> {
//! let client = AnkiClient::new();
//!
//! let note = NoteBuilder::new("日文動詞", "Japanese Verb")
//!     .field("核心單字", "飲む")
//!     .field("核心意義", "喝")
//!     .tag("verb")
//!     .build();
//!
//! let note_id = client.notes().add(note).await?;
//! println!("Created note: {}", note_id);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::Note;

/// ID reported by [`NoteActions::add_many`] for a note Anki rejected.
pub const REJECTED_NOTE_ID: i64 = 0;

/// Provides access to note-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::notes()`].
#[derive(Debug)]
pub struct NoteActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct AddNoteParams<'a> {
    note: &'a Note,
}

#[derive(Serialize)]
struct AddNotesParams<'a> {
    notes: &'a [Note],
}

impl<'a> NoteActions<'a> {
    /// Add a new note.
    ///
    /// Returns the ID of the created note. A result that is not a number is
    /// reported as [`Error::UnexpectedResult`](crate::Error::UnexpectedResult).
    ///
    /// # Note on Duplicates
    ///
    /// By default, AnkiConnect will reject duplicate notes. Use
    /// [`NoteBuilder::allow_duplicate()`](crate::NoteBuilder::allow_duplicate)
    /// to override this behavior.
    pub async fn add(&self, note: Note) -> Result<i64> {
        self.client
            .invoke("addNote", AddNoteParams { note: &note })
            .await
    }

    /// Add multiple notes in one request.
    ///
    /// The returned IDs line up with the input. A note Anki rejected (for
    /// example a duplicate) is reported as [`REJECTED_NOTE_ID`] while the
    /// rest of the batch still succeeds. A failure of the call itself fails
    /// the whole batch.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ankijp::{AnkiClient, NoteBuilder, REJECTED_NOTE_ID};
    /// # async fn example() -> ankijp::Result<()> {
    /// let client = AnkiClient::new();
    /// let notes = vec![
    ///     NoteBuilder::new("日文單字", "Japanese Normal Word")
    ///         .field("核心單字", "猫")
    ///         .build(),
    /// ];
    ///
    /// let ids = client.notes().add_many(&notes).await?;
    /// let added = ids.iter().filter(|&&id| id != REJECTED_NOTE_ID).count();
    /// println!("{}/{} added", added, notes.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add_many(&self, notes: &[Note]) -> Result<Vec<i64>> {
        let ids: Vec<Option<i64>> = self
            .client
            .invoke("addNotes", AddNotesParams { notes })
            .await?;

        Ok(ids
            .into_iter()
            .map(|id| id.unwrap_or(REJECTED_NOTE_ID))
            .collect())
    }
}
