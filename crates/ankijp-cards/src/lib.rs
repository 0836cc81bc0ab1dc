//! Japanese flashcard types, validation and template rendering.
//!
//! Four card types are supported: `verb`, `adjective`, `normal` and
//! `grammar`. Each one has a fixed field schema, a set of required fields, an
//! Anki model definition and a pair of front/back templates.
//!
//! # Building cards
//!
//! ```
//! use ankijp_cards::create_card_from_json;
//!
//! let card = create_card_from_json(
//!     "verb",
//!     r#"{"核心單字": "飲む", "核心意義": "喝", "發音": "のむ",
//!         "情境例句": "水を飲む。", "例句翻譯": "喝水。"}"#,
//! ).unwrap();
//!
//! assert_eq!(card.note_fields()["發音"], "のむ");
//! ```
//!
//! Validation reports the first empty required field:
//!
//! ```
//! use ankijp_cards::create_card_from_json;
//!
//! let err = create_card_from_json("verb", r#"{"核心單字": "飲む"}"#).unwrap_err();
//! assert_eq!(err.to_string(), "動詞卡片驗證失敗: 欄位 '核心意義' 不能為空");
//! ```
//!
//! # Rendering
//!
//! [`CardRenderer`] combines the factory with the bundled templates; see
//! [`templates`] for the template syntax.

pub mod card;
pub mod error;
pub mod factory;
pub mod model;
pub mod service;
pub mod templates;

pub use card::{AdjectiveCard, Card, CardFields, CardType, GrammarCard, NormalWordCard, VerbCard};
pub use error::{Error, Result, ValidationError};
pub use factory::{create_card, create_card_from_json, supported_card_types, validate_card_type};
pub use model::{CARD_CSS, CARD_TEMPLATE_NAME, ModelDefinition, TemplateDefinition};
pub use service::{CardRenderer, RenderedCard};
pub use templates::{Side, Template, TemplateManager};
