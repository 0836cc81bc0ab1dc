//! Anki model (note type) definitions for each card type.

use crate::card::CardType;
use crate::templates::{Side, raw_template};

/// Styling shared by all models.
pub const CARD_CSS: &str = include_str!("../templates/card.css");

/// Name of the single card template each model carries.
pub const CARD_TEMPLATE_NAME: &str = "Card 1";

/// One card template of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefinition {
    /// Template name.
    pub name: String,
    /// Front HTML.
    pub front: String,
    /// Back HTML.
    pub back: String,
}

/// Everything needed to create a model in Anki.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDefinition {
    /// Model name.
    pub name: String,
    /// Field names in order.
    pub fields: Vec<String>,
    /// Model CSS.
    pub css: String,
    /// Card templates.
    pub templates: Vec<TemplateDefinition>,
}

impl CardType {
    /// The model definition for this card type, built from the bundled
    /// templates.
    ///
    /// ```
    /// use ankijp_cards::CardType;
    ///
    /// let model = CardType::Grammar.model_definition();
    /// assert_eq!(model.name, "Japanese Grammar");
    /// assert_eq!(model.fields[0], "文法要點");
    /// assert_eq!(model.templates[0].name, "Card 1");
    /// ```
    pub fn model_definition(self) -> ModelDefinition {
        ModelDefinition {
            name: self.model_name().to_string(),
            fields: self.fields().iter().map(|f| f.to_string()).collect(),
            css: CARD_CSS.to_string(),
            templates: vec![TemplateDefinition {
                name: CARD_TEMPLATE_NAME.to_string(),
                front: raw_template(self, Side::Front).to_string(),
                back: raw_template(self, Side::Back).to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Template;

    #[test]
    fn templates_only_reference_declared_fields() {
        for card_type in CardType::ALL {
            let model = card_type.model_definition();
            let template = &model.templates[0];

            for source in [&template.front, &template.back] {
                let mut rest = source.as_str();
                while let Some(start) = rest.find("{{") {
                    let end = rest[start..].find("}}").unwrap() + start;
                    let name = rest[start + 2..end].trim_start_matches(['#', '^', '/']).trim();
                    assert!(
                        name == "FrontSide" || model.fields.iter().any(|f| f == name),
                        "{} references unknown field {}",
                        card_type,
                        name
                    );
                    rest = &rest[end + 2..];
                }
                Template::parse(&model.name, source).unwrap();
            }
        }
    }

    #[test]
    fn every_model_has_css() {
        let model = CardType::Verb.model_definition();
        assert!(model.css.contains(".card"));
        assert_eq!(model.fields.len(), 9);
    }
}
