//! Building validated cards from untyped input.

use serde_json::{Map, Value};
use tracing::debug;

use crate::card::{Card, CardType};
use crate::error::{Error, Result};

/// Tags of all supported card types.
pub fn supported_card_types() -> Vec<&'static str> {
    CardType::supported_tags()
}

/// Check that `tag` names a supported card type.
///
/// ```
/// use ankijp_cards::{CardType, validate_card_type};
///
/// assert_eq!(validate_card_type("grammar").unwrap(), CardType::Grammar);
/// assert!(validate_card_type("noun").is_err());
/// ```
pub fn validate_card_type(tag: &str) -> Result<CardType> {
    tag.parse()
}

/// Decode and validate a card of type `tag` from an untyped map.
pub fn create_card(tag: &str, data: &Map<String, Value>) -> Result<Card> {
    let card_type = validate_card_type(tag)?;
    let card = Card::from_map(card_type, data)?;
    card.validate()
        .map_err(|source| Error::Validation { card_type, source })?;
    debug!(card_type = tag, fields = data.len(), "Created card");
    Ok(card)
}

/// Parse `text` as a JSON object and build a card from it.
pub fn create_card_from_json(tag: &str, text: &str) -> Result<Card> {
    let data: Map<String, Value> = serde_json::from_str(text).map_err(Error::Json)?;
    create_card(tag, &data)
}
