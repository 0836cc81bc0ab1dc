//! Card types and their field schemas.
//!
//! Each card type has its own struct whose fields carry the literal field
//! names used by the Anki model and the templates. Fields missing from the
//! input or set to null decode as empty strings; keys the card does not
//! declare are kept in `extra` and passed through untouched.
//!
//! # Example
//!
//! ```
//! use ankijp_cards::{Card, CardType};
//! use serde_json::json;
//!
//! let data = json!({
//!     "核心單字": "飲む",
//!     "核心意義": "喝",
//!     "發音": "のむ",
//!     "情境例句": "水を飲む。",
//!     "例句翻譯": "喝水。"
//! });
//!
//! let card = Card::from_map(CardType::Verb, data.as_object().unwrap()).unwrap();
//! assert!(card.validate().is_ok());
//! assert_eq!(card.card_type().model_name(), "Japanese Verb");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result, ValidationError};

/// The four supported card types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardType {
    /// A verb with conjugations.
    Verb,
    /// An adjective with its main inflections.
    Adjective,
    /// Any other word.
    Normal,
    /// A grammar point.
    Grammar,
}

const VERB_FIELDS: &[&str] = &[
    "核心單字", "詞性分類", "核心意義", "發音", "重音", "常用變化", "情境例句", "例句翻譯", "圖片提示",
];

const ADJECTIVE_FIELDS: &[&str] = &[
    "核心單字", "詞性分類", "核心意義", "發音", "重音", "主要變化", "情境例句", "例句翻譯", "相關詞彙",
];

const NORMAL_FIELDS: &[&str] = &[
    "核心單字", "詞性分類", "核心意義", "發音", "重音", "使用方式", "情境例句", "例句翻譯", "同義詞",
    "反義詞", "圖片提示",
];

const GRAMMAR_FIELDS: &[&str] = &[
    "文法要點", "結構形式", "意義說明", "使用時機", "例句示範", "例句翻譯", "情境課題", "解答範例",
    "難度等級", "相關文法", "常見錯誤", "記憶技巧",
];

const WORD_REQUIRED: &[&str] = &["核心單字", "核心意義", "發音", "情境例句", "例句翻譯"];

const GRAMMAR_REQUIRED: &[&str] = &["文法要點", "結構形式", "意義說明", "例句示範", "例句翻譯"];

impl CardType {
    /// All card types, in the order they are listed to users.
    pub const ALL: [CardType; 4] = [
        CardType::Verb,
        CardType::Adjective,
        CardType::Normal,
        CardType::Grammar,
    ];

    /// The tag used on the command line and as a note tag.
    pub fn tag(self) -> &'static str {
        match self {
            CardType::Verb => "verb",
            CardType::Adjective => "adjective",
            CardType::Normal => "normal",
            CardType::Grammar => "grammar",
        }
    }

    /// Human-readable name used in messages.
    pub fn display_name(self) -> &'static str {
        match self {
            CardType::Verb => "動詞",
            CardType::Adjective => "形容詞",
            CardType::Normal => "一般單字",
            CardType::Grammar => "文法",
        }
    }

    /// Name of the Anki model (note type) for this card type.
    pub fn model_name(self) -> &'static str {
        match self {
            CardType::Verb => "Japanese Verb",
            CardType::Adjective => "Japanese Adjective",
            CardType::Normal => "Japanese Normal Word",
            CardType::Grammar => "Japanese Grammar",
        }
    }

    /// Deck that `init` prepares when no deck is given.
    pub fn default_deck(self) -> &'static str {
        match self {
            CardType::Verb => "日文動詞",
            CardType::Adjective => "日文形容詞",
            CardType::Normal => "日文單字",
            CardType::Grammar => "日文文法",
        }
    }

    /// Declared field names, in model order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            CardType::Verb => VERB_FIELDS,
            CardType::Adjective => ADJECTIVE_FIELDS,
            CardType::Normal => NORMAL_FIELDS,
            CardType::Grammar => GRAMMAR_FIELDS,
        }
    }

    /// Fields that must be non-empty, in the order they are checked.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            CardType::Grammar => GRAMMAR_REQUIRED,
            _ => WORD_REQUIRED,
        }
    }

    /// Tags of all supported card types.
    pub fn supported_tags() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.tag()).collect()
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CardType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| Error::UnsupportedType(s.to_string()))
    }
}

/// Behaviour shared by the per-type card structs.
pub trait CardFields: Sized {
    /// The card type this struct represents.
    const CARD_TYPE: CardType;

    /// Declared field values in model order.
    fn values(&self) -> Vec<(&'static str, &str)>;

    /// Undeclared keys carried over from the input.
    fn extra(&self) -> &Map<String, Value>;

    /// Decode from an untyped map.
    ///
    /// Missing keys and nulls become empty strings. A declared key holding
    /// any other non-string value is a decode error.
    fn from_map(data: &Map<String, Value>) -> serde_json::Result<Self>;

    /// Check that every required field is non-empty.
    ///
    /// Reports the first failure in required-field order.
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        let values = self.values();
        for &field in Self::CARD_TYPE.required_fields() {
            let present = values
                .iter()
                .any(|(name, value)| *name == field && !value.is_empty());
            if !present {
                return Err(ValidationError { field });
            }
        }
        Ok(())
    }

    /// All declared fields (empty ones included) plus the extra keys.
    fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra().clone();
        for (name, value) in self.values() {
            map.insert(name.to_string(), Value::String(value.to_string()));
        }
        map
    }
}

/// Decode a card struct, treating null values as absent keys.
fn decode<T: DeserializeOwned>(data: &Map<String, Value>) -> serde_json::Result<T> {
    let present = data
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    serde_json::from_value(Value::Object(present))
}

/// A verb card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerbCard {
    /// `核心單字`: the headword.
    #[serde(rename = "核心單字")]
    pub word: String,
    /// `詞性分類`: part of speech.
    #[serde(rename = "詞性分類")]
    pub word_class: String,
    /// `核心意義`: core meaning.
    #[serde(rename = "核心意義")]
    pub meaning: String,
    /// `發音`: reading in kana.
    #[serde(rename = "發音")]
    pub reading: String,
    /// `重音`: pitch accent.
    #[serde(rename = "重音")]
    pub accent: String,
    /// `常用變化`: common conjugations.
    #[serde(rename = "常用變化")]
    pub conjugations: String,
    /// `情境例句`: example sentence.
    #[serde(rename = "情境例句")]
    pub example: String,
    /// `例句翻譯`: translation of the example.
    #[serde(rename = "例句翻譯")]
    pub translation: String,
    /// `圖片提示`: image or picture cue.
    #[serde(rename = "圖片提示")]
    pub image_hint: String,
    /// Undeclared input keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CardFields for VerbCard {
    const CARD_TYPE: CardType = CardType::Verb;

    fn values(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("核心單字", &self.word),
            ("詞性分類", &self.word_class),
            ("核心意義", &self.meaning),
            ("發音", &self.reading),
            ("重音", &self.accent),
            ("常用變化", &self.conjugations),
            ("情境例句", &self.example),
            ("例句翻譯", &self.translation),
            ("圖片提示", &self.image_hint),
        ]
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    fn from_map(data: &Map<String, Value>) -> serde_json::Result<Self> {
        decode(data)
    }
}

/// An adjective card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjectiveCard {
    /// `核心單字`: the headword.
    #[serde(rename = "核心單字")]
    pub word: String,
    /// `詞性分類`: part of speech.
    #[serde(rename = "詞性分類")]
    pub word_class: String,
    /// `核心意義`: core meaning.
    #[serde(rename = "核心意義")]
    pub meaning: String,
    /// `發音`: reading in kana.
    #[serde(rename = "發音")]
    pub reading: String,
    /// `重音`: pitch accent.
    #[serde(rename = "重音")]
    pub accent: String,
    /// `主要變化`: main inflections.
    #[serde(rename = "主要變化")]
    pub inflections: String,
    /// `情境例句`: example sentence.
    #[serde(rename = "情境例句")]
    pub example: String,
    /// `例句翻譯`: translation of the example.
    #[serde(rename = "例句翻譯")]
    pub translation: String,
    /// `相關詞彙`: related words.
    #[serde(rename = "相關詞彙")]
    pub related_words: String,
    /// Undeclared input keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CardFields for AdjectiveCard {
    const CARD_TYPE: CardType = CardType::Adjective;

    fn values(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("核心單字", &self.word),
            ("詞性分類", &self.word_class),
            ("核心意義", &self.meaning),
            ("發音", &self.reading),
            ("重音", &self.accent),
            ("主要變化", &self.inflections),
            ("情境例句", &self.example),
            ("例句翻譯", &self.translation),
            ("相關詞彙", &self.related_words),
        ]
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    fn from_map(data: &Map<String, Value>) -> serde_json::Result<Self> {
        decode(data)
    }
}

/// A card for any word that is not a verb or adjective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalWordCard {
    /// `核心單字`: the headword.
    #[serde(rename = "核心單字")]
    pub word: String,
    /// `詞性分類`: part of speech.
    #[serde(rename = "詞性分類")]
    pub word_class: String,
    /// `核心意義`: core meaning.
    #[serde(rename = "核心意義")]
    pub meaning: String,
    /// `發音`: reading in kana.
    #[serde(rename = "發音")]
    pub reading: String,
    /// `重音`: pitch accent.
    #[serde(rename = "重音")]
    pub accent: String,
    /// `使用方式`: how the word is used.
    #[serde(rename = "使用方式")]
    pub usage: String,
    /// `情境例句`: example sentence.
    #[serde(rename = "情境例句")]
    pub example: String,
    /// `例句翻譯`: translation of the example.
    #[serde(rename = "例句翻譯")]
    pub translation: String,
    /// `同義詞`: synonyms.
    #[serde(rename = "同義詞")]
    pub synonyms: String,
    /// `反義詞`: antonyms.
    #[serde(rename = "反義詞")]
    pub antonyms: String,
    /// `圖片提示`: image or picture cue.
    #[serde(rename = "圖片提示")]
    pub image_hint: String,
    /// Undeclared input keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CardFields for NormalWordCard {
    const CARD_TYPE: CardType = CardType::Normal;

    fn values(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("核心單字", &self.word),
            ("詞性分類", &self.word_class),
            ("核心意義", &self.meaning),
            ("發音", &self.reading),
            ("重音", &self.accent),
            ("使用方式", &self.usage),
            ("情境例句", &self.example),
            ("例句翻譯", &self.translation),
            ("同義詞", &self.synonyms),
            ("反義詞", &self.antonyms),
            ("圖片提示", &self.image_hint),
        ]
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    fn from_map(data: &Map<String, Value>) -> serde_json::Result<Self> {
        decode(data)
    }
}

/// A grammar point card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarCard {
    /// `文法要點`: the grammar point.
    #[serde(rename = "文法要點")]
    pub point: String,
    /// `結構形式`: structure pattern.
    #[serde(rename = "結構形式")]
    pub structure: String,
    /// `意義說明`: explanation of the meaning.
    #[serde(rename = "意義說明")]
    pub meaning: String,
    /// `使用時機`: when to use it.
    #[serde(rename = "使用時機")]
    pub usage: String,
    /// `例句示範`: example sentences.
    #[serde(rename = "例句示範")]
    pub examples: String,
    /// `例句翻譯`: translation of the example.
    #[serde(rename = "例句翻譯")]
    pub translation: String,
    /// `情境課題`: practice exercise.
    #[serde(rename = "情境課題")]
    pub exercise: String,
    /// `解答範例`: model answer.
    #[serde(rename = "解答範例")]
    pub answer: String,
    /// `難度等級`: difficulty level, e.g. N3.
    #[serde(rename = "難度等級")]
    pub level: String,
    /// `相關文法`: related grammar points.
    #[serde(rename = "相關文法")]
    pub related_grammar: String,
    /// `常見錯誤`: common mistakes.
    #[serde(rename = "常見錯誤")]
    pub common_mistakes: String,
    /// `記憶技巧`: memory aid.
    #[serde(rename = "記憶技巧")]
    pub mnemonic: String,
    /// Undeclared input keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CardFields for GrammarCard {
    const CARD_TYPE: CardType = CardType::Grammar;

    fn values(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("文法要點", &self.point),
            ("結構形式", &self.structure),
            ("意義說明", &self.meaning),
            ("使用時機", &self.usage),
            ("例句示範", &self.examples),
            ("例句翻譯", &self.translation),
            ("情境課題", &self.exercise),
            ("解答範例", &self.answer),
            ("難度等級", &self.level),
            ("相關文法", &self.related_grammar),
            ("常見錯誤", &self.common_mistakes),
            ("記憶技巧", &self.mnemonic),
        ]
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    fn from_map(data: &Map<String, Value>) -> serde_json::Result<Self> {
        decode(data)
    }
}

/// A decoded card of any type.
#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    /// A `verb` card.
    Verb(VerbCard),
    /// An `adjective` card.
    Adjective(AdjectiveCard),
    /// A `normal` word card.
    Normal(NormalWordCard),
    /// A `grammar` card.
    Grammar(GrammarCard),
}

impl Card {
    /// Decode a card of the given type from an untyped map.
    pub fn from_map(card_type: CardType, data: &Map<String, Value>) -> Result<Self> {
        let decoded = match card_type {
            CardType::Verb => VerbCard::from_map(data).map(Card::Verb),
            CardType::Adjective => AdjectiveCard::from_map(data).map(Card::Adjective),
            CardType::Normal => NormalWordCard::from_map(data).map(Card::Normal),
            CardType::Grammar => GrammarCard::from_map(data).map(Card::Grammar),
        };
        decoded.map_err(|source| Error::Decode { card_type, source })
    }

    /// The type of this card.
    pub fn card_type(&self) -> CardType {
        match self {
            Card::Verb(_) => CardType::Verb,
            Card::Adjective(_) => CardType::Adjective,
            Card::Normal(_) => CardType::Normal,
            Card::Grammar(_) => CardType::Grammar,
        }
    }

    /// Check that every required field is non-empty.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        match self {
            Card::Verb(card) => card.validate(),
            Card::Adjective(card) => card.validate(),
            Card::Normal(card) => card.validate(),
            Card::Grammar(card) => card.validate(),
        }
    }

    /// All declared fields plus the extra keys, as template data.
    pub fn to_map(&self) -> Map<String, Value> {
        match self {
            Card::Verb(card) => card.to_map(),
            Card::Adjective(card) => card.to_map(),
            Card::Normal(card) => card.to_map(),
            Card::Grammar(card) => card.to_map(),
        }
    }

    /// Field values as sent to Anki.
    ///
    /// Strings are kept verbatim, other JSON values are sent JSON-encoded.
    /// Empty values and nulls are left out so the model's fields stay blank.
    pub fn note_fields(&self) -> HashMap<String, String> {
        self.to_map()
            .into_iter()
            .filter_map(|(name, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (!text.is_empty()).then_some((name, text))
            })
            .collect()
    }
}
