//! Action modules for AnkiConnect operations.
//!
//! Each module provides a set of related operations grouped by domain.

mod decks;
mod misc;
mod models;
mod notes;

pub use decks::DeckActions;
pub use misc::MiscActions;
pub use models::ModelActions;
pub use notes::{NoteActions, REJECTED_NOTE_ID};
