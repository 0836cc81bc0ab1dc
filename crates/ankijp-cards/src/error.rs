//! Error types for ankijp-cards.

use thiserror::Error;

use crate::card::CardType;
use crate::templates::Side;

/// Result type for ankijp-cards operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A required field was missing or empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("欄位 '{field}' 不能為空")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
}

/// Errors that can occur while building or rendering cards.
#[derive(Debug, Error)]
pub enum Error {
    /// The card type tag is not one of the supported tags.
    #[error("不支援的卡片類型: {0}。支援的類型: [{supported}]", supported = CardType::supported_tags().join(" "))]
    UnsupportedType(String),

    /// The input map could not be decoded into the card's fields.
    #[error("建立{}卡片失敗: {source}", .card_type.display_name())]
    Decode {
        /// Card type being decoded.
        card_type: CardType,
        /// Underlying decode error.
        source: serde_json::Error,
    },

    /// The card decoded but a required field is empty.
    #[error("{}卡片驗證失敗: {source}", .card_type.display_name())]
    Validation {
        /// Card type being validated.
        card_type: CardType,
        /// The failed check.
        source: ValidationError,
    },

    /// The input text is not a JSON object.
    #[error("JSON 解析失敗: {0}")]
    Json(#[source] serde_json::Error),

    /// No template registered for this card type and side.
    #[error("找不到卡片類型 '{card_type}' 的{}模板", .side.label())]
    TemplateNotFound {
        /// Requested card type.
        card_type: CardType,
        /// Requested side.
        side: Side,
    },

    /// A template source is malformed.
    #[error("解析模板 {name} 失敗: {message}")]
    TemplateParse {
        /// Template name, e.g. `verb_front.html`.
        name: String,
        /// What went wrong, with the byte offset.
        message: String,
    },
}

impl Error {
    /// The failed field check, if this is a validation error.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}
