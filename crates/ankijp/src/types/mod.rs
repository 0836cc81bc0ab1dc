//! Domain types for AnkiConnect.
//!
//! This module contains the wire shapes for notes and note types (models).

mod model;
mod note;

pub use model::{CreateCardTemplate, CreateModelParams};
pub use note::{Note, NoteBuilder, NoteOptions};
