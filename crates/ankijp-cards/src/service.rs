//! Card creation and rendering in one step.

use serde_json::{Map, Value};

use crate::card::{Card, CardType};
use crate::error::Result;
use crate::factory::{create_card, supported_card_types, validate_card_type};
use crate::templates::TemplateManager;

/// Both rendered faces of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    /// Front HTML.
    pub front: String,
    /// Back HTML, with the front already expanded into `{{FrontSide}}`.
    pub back: String,
}

/// Validates input data and renders it with the bundled templates.
///
/// # Example
///
/// ```
/// use ankijp_cards::CardRenderer;
/// use serde_json::json;
///
/// let renderer = CardRenderer::new().unwrap();
/// let data = json!({
///     "核心單字": "学校",
///     "核心意義": "學校",
///     "發音": "がっこう",
///     "情境例句": "毎日学校に行きます。",
///     "例句翻譯": "每天去學校。"
/// });
///
/// let card = renderer.render("normal", data.as_object().unwrap()).unwrap();
/// assert!(card.front.contains("学校"));
/// assert!(card.back.contains("がっこう"));
/// ```
#[derive(Debug, Clone)]
pub struct CardRenderer {
    templates: TemplateManager,
}

impl CardRenderer {
    /// Create a renderer over the bundled templates.
    pub fn new() -> Result<Self> {
        Ok(Self::with_templates(TemplateManager::new()?))
    }

    /// Create a renderer over a custom template set.
    pub fn with_templates(templates: TemplateManager) -> Self {
        Self { templates }
    }

    /// Check the type, build and validate the card, and render both faces.
    pub fn render(&self, tag: &str, data: &Map<String, Value>) -> Result<RenderedCard> {
        let card = self.prepare(tag, data)?;
        let data = card.to_map();
        Ok(RenderedCard {
            front: self.templates.render_front(card.card_type(), &data)?,
            back: self.templates.render_back(card.card_type(), &data)?,
        })
    }

    /// Build the card and render its front.
    pub fn render_front(&self, tag: &str, data: &Map<String, Value>) -> Result<String> {
        let card = self.prepare(tag, data)?;
        self.templates.render_front(card.card_type(), &card.to_map())
    }

    /// Build the card and render its back.
    pub fn render_back(&self, tag: &str, data: &Map<String, Value>) -> Result<String> {
        let card = self.prepare(tag, data)?;
        self.templates.render_back(card.card_type(), &card.to_map())
    }

    /// Tags of all supported card types.
    pub fn supported_card_types(&self) -> Vec<&'static str> {
        supported_card_types()
    }

    /// Card types with templates available.
    pub fn available_templates(&self) -> Vec<CardType> {
        self.templates.available_templates()
    }

    fn prepare(&self, tag: &str, data: &Map<String, Value>) -> Result<Card> {
        let card_type = validate_card_type(tag)?;
        self.templates.validate_template(card_type)?;
        create_card(tag, data)
    }
}
