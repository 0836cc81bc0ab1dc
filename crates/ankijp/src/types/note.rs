//! Note-related types.

use std::collections::HashMap;

use serde::Serialize;

/// A new note to be added to Anki.
///
/// Use [`NoteBuilder`] for a more ergonomic way to construct notes.
///
/// # Field Values
///
/// Field values are HTML. Field names are case-sensitive and must match the
/// model's field names exactly; AnkiConnect ignores names the model lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// The deck to add the note to.
    pub deck_name: String,
    /// The note type (model) name.
    pub model_name: String,
    /// Field values, keyed by field name.
    pub fields: HashMap<String, String>,
    /// Tags for the note.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Options for duplicate handling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<NoteOptions>,
}

/// Options for adding notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    /// Allow duplicate notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_duplicate: Option<bool>,
}

/// Builder for creating notes with a fluent API.
///
/// # Example
///
/// ```
/// use ankijp::NoteBuilder;
///
/// let note = NoteBuilder::new("日文動詞", "Japanese Verb")
///     .field("核心單字", "飲む")
///     .field("核心意義", "喝")
///     .tag("anki-japanese-cli")
///     .tag("verb")
///     .build();
///
/// assert_eq!(note.tags, vec!["anki-japanese-cli", "verb"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoteBuilder {
    deck_name: String,
    model_name: String,
    fields: HashMap<String, String>,
    tags: Vec<String>,
    options: Option<NoteOptions>,
}

impl NoteBuilder {
    /// Create a new note builder.
    ///
    /// # Arguments
    ///
    /// * `deck` - The deck name to add the note to
    /// * `model` - The note type (model) name
    pub fn new(deck: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            deck_name: deck.into(),
            model_name: model.into(),
            ..Default::default()
        }
    }

    /// Set a field value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set several field values at once.
    pub fn fields(
        mut self,
        fields: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        self.fields
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a tag to the note.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags to the note.
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Allow duplicate notes.
    pub fn allow_duplicate(mut self, allow: bool) -> Self {
        self.options
            .get_or_insert_with(NoteOptions::default)
            .allow_duplicate = Some(allow);
        self
    }

    /// Build the note.
    pub fn build(self) -> Note {
        Note {
            deck_name: self.deck_name,
            model_name: self.model_name,
            fields: self.fields,
            tags: self.tags,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tags_and_options_are_omitted() {
        let note = NoteBuilder::new("日文單字", "Japanese Normal Word")
            .field("核心單字", "猫")
            .build();

        let value = serde_json::to_value(&note).unwrap();

        assert_eq!(value["deckName"], "日文單字");
        assert_eq!(value["modelName"], "Japanese Normal Word");
        assert_eq!(value["fields"]["核心單字"], "猫");
        assert!(value.get("tags").is_none());
        assert!(value.get("options").is_none());
    }

    #[test]
    fn allow_duplicate_sets_option() {
        let note = NoteBuilder::new("Default", "Basic")
            .allow_duplicate(true)
            .build();

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["options"]["allowDuplicate"], true);
    }
}
