//! Front/back card templates.
//!
//! Templates use the same moustache syntax as Anki card templates, so one
//! source serves both the model pushed to Anki and local previews:
//!
//! - `{{field}}` inserts a field value as-is (fields hold HTML)
//! - `{{#field}}...{{/field}}` renders its body only when the field is non-empty
//! - `{{^field}}...{{/field}}` renders its body only when the field is empty
//! - `{{! comment}}` is dropped
//! - `{{FrontSide}}` on a back template inserts the rendered front
//!
//! # Example
//!
//! ```
//! use ankijp_cards::templates::Template;
//! use serde_json::json;
//!
//! let template = Template::parse("demo", "<b>{{word}}</b>{{#note}} ({{note}}){{/note}}").unwrap();
//! let data = json!({"word": "猫", "note": ""});
//!
//! assert_eq!(template.render(data.as_object().unwrap()), "<b>猫</b>");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

use crate::card::CardType;
use crate::error::{Error, Result};

/// Field name Anki uses for the rendered front on the back side.
pub const FRONT_SIDE: &str = "FrontSide";

/// One face of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    /// Label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Side::Front => "正面",
            Side::Back => "背面",
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Bundled source of a card type's template.
pub fn raw_template(card_type: CardType, side: Side) -> &'static str {
    match (card_type, side) {
        (CardType::Verb, Side::Front) => include_str!("../templates/verb_front.html"),
        (CardType::Verb, Side::Back) => include_str!("../templates/verb_back.html"),
        (CardType::Adjective, Side::Front) => include_str!("../templates/adjective_front.html"),
        (CardType::Adjective, Side::Back) => include_str!("../templates/adjective_back.html"),
        (CardType::Normal, Side::Front) => include_str!("../templates/normal_front.html"),
        (CardType::Normal, Side::Back) => include_str!("../templates/normal_back.html"),
        (CardType::Grammar, Side::Front) => include_str!("../templates/grammar_front.html"),
        (CardType::Grammar, Side::Back) => include_str!("../templates/grammar_back.html"),
    }
}

/// File name of a bundled template, e.g. `verb_front.html`.
pub fn template_name(card_type: CardType, side: Side) -> String {
    format!("{}_{}.html", card_type.tag(), side.suffix())
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Field(String),
    Section {
        name: String,
        inverted: bool,
        body: Vec<Node>,
    },
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

struct OpenSection {
    name: String,
    inverted: bool,
    offset: usize,
    outer: Vec<Node>,
}

impl Template {
    /// Parse a template source.
    ///
    /// Fails on an unterminated tag, an empty tag, or sections that do not
    /// close in order. The error carries `name`.
    pub fn parse(name: &str, source: &str) -> Result<Self> {
        let parse_error = |message: String| Error::TemplateParse {
            name: name.to_string(),
            message,
        };

        let mut nodes = Vec::new();
        let mut stack: Vec<OpenSection> = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                nodes.push(Node::Text(rest[..start].to_string()));
            }
            let tag_offset = offset + start;
            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or_else(|| parse_error(format!("unterminated tag at byte {}", tag_offset)))?;
            let tag = after_open[..end].trim();

            let consumed = start + 2 + end + 2;
            rest = &rest[consumed..];
            offset += consumed;

            if tag.starts_with('!') {
                continue;
            }

            let (sigil, field) = match tag.chars().next() {
                Some(c @ ('#' | '^' | '/')) => (Some(c), tag[1..].trim()),
                _ => (None, tag),
            };
            if field.is_empty() {
                return Err(parse_error(format!("empty tag at byte {}", tag_offset)));
            }

            match sigil {
                Some(c @ ('#' | '^')) => {
                    stack.push(OpenSection {
                        name: field.to_string(),
                        inverted: c == '^',
                        offset: tag_offset,
                        outer: std::mem::take(&mut nodes),
                    });
                }
                Some(_) => {
                    let open = stack.pop().ok_or_else(|| {
                        parse_error(format!(
                            "unexpected {{{{/{}}}}} at byte {}",
                            field, tag_offset
                        ))
                    })?;
                    if open.name != field {
                        return Err(parse_error(format!(
                            "{{{{/{}}}}} at byte {} closes {{{{#{}}}}}",
                            field, tag_offset, open.name
                        )));
                    }
                    let body = std::mem::replace(&mut nodes, open.outer);
                    nodes.push(Node::Section {
                        name: open.name,
                        inverted: open.inverted,
                        body,
                    });
                }
                None => nodes.push(Node::Field(field.to_string())),
            }
        }

        if let Some(open) = stack.pop() {
            return Err(parse_error(format!(
                "unclosed section {{{{#{}}}}} at byte {}",
                open.name, open.offset
            )));
        }
        if !rest.is_empty() {
            nodes.push(Node::Text(rest.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            nodes,
        })
    }

    /// Template name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render with the given field data.
    pub fn render(&self, data: &Map<String, Value>) -> String {
        let mut out = String::new();
        render_nodes(&self.nodes, &Context { data, front_side: None }, &mut out);
        out
    }

    /// Render a back template, with `{{FrontSide}}` bound to `front`.
    pub fn render_with_front(&self, data: &Map<String, Value>, front: &str) -> String {
        let mut out = String::new();
        let context = Context {
            data,
            front_side: Some(front),
        };
        render_nodes(&self.nodes, &context, &mut out);
        out
    }
}

struct Context<'a> {
    data: &'a Map<String, Value>,
    front_side: Option<&'a str>,
}

impl Context<'_> {
    fn lookup(&self, name: &str) -> Cow<'_, str> {
        if let (FRONT_SIDE, Some(front)) = (name, self.front_side) {
            return Cow::Borrowed(front);
        }
        match self.data.get(name) {
            None | Some(Value::Null) => Cow::Borrowed(""),
            Some(Value::String(s)) => Cow::Borrowed(s),
            Some(Value::Bool(false)) => Cow::Borrowed(""),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }
}

fn render_nodes(nodes: &[Node], context: &Context<'_>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Field(name) => out.push_str(&context.lookup(name)),
            Node::Section {
                name,
                inverted,
                body,
            } => {
                let present = !context.lookup(name).trim().is_empty();
                if present != *inverted {
                    render_nodes(body, context, out);
                }
            }
        }
    }
}

/// Parsed templates keyed by card type and side.
#[derive(Debug, Clone, Default)]
pub struct TemplateManager {
    templates: HashMap<(CardType, Side), Template>,
}

impl TemplateManager {
    /// Parse all bundled templates.
    pub fn new() -> Result<Self> {
        let mut manager = Self::default();
        for card_type in CardType::ALL {
            for side in [Side::Front, Side::Back] {
                manager.insert(card_type, side, raw_template(card_type, side))?;
            }
        }
        debug!(count = manager.templates.len(), "Loaded card templates");
        Ok(manager)
    }

    /// Parse and register a template, replacing any previous one.
    pub fn insert(&mut self, card_type: CardType, side: Side, source: &str) -> Result<()> {
        let template = Template::parse(&template_name(card_type, side), source)?;
        self.templates.insert((card_type, side), template);
        Ok(())
    }

    /// The template for a card type and side.
    pub fn get(&self, card_type: CardType, side: Side) -> Result<&Template> {
        self.templates
            .get(&(card_type, side))
            .ok_or(Error::TemplateNotFound { card_type, side })
    }

    /// Render the front face.
    pub fn render_front(&self, card_type: CardType, data: &Map<String, Value>) -> Result<String> {
        Ok(self.get(card_type, Side::Front)?.render(data))
    }

    /// Render the back face. `{{FrontSide}}` expands to the rendered front.
    pub fn render_back(&self, card_type: CardType, data: &Map<String, Value>) -> Result<String> {
        let front = self.render_front(card_type, data)?;
        Ok(self
            .get(card_type, Side::Back)?
            .render_with_front(data, &front))
    }

    /// Check that both faces of a card type are registered.
    pub fn validate_template(&self, card_type: CardType) -> Result<()> {
        self.get(card_type, Side::Front)?;
        self.get(card_type, Side::Back)?;
        Ok(())
    }

    /// Card types with at least one registered face.
    pub fn available_templates(&self) -> Vec<CardType> {
        let mut types: Vec<_> = self.templates.keys().map(|(t, _)| *t).collect();
        types.sort();
        types.dedup();
        types
    }
}
