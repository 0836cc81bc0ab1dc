//! `add`: validate cards and submit them as notes.

use std::io::Write;

use ankijp::{AnkiClient, Note, NoteBuilder, REJECTED_NOTE_ID};
use ankijp_cards::{CardType, create_card, validate_card_type};
use tracing::{info, warn};

use crate::cli::AddArgs;
use crate::config::Config;
use crate::error::{CliError, Result};

use super::read_cards;

/// Tag added to every note this tool creates.
pub const TOOL_TAG: &str = "anki-japanese-cli";

pub(crate) async fn run(
    client: &AnkiClient,
    config: &Config,
    args: &AddArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let card_type = validate_card_type(&args.card_type)?;
    let records = read_cards(&args.input, args.batch, out)?;
    if records.is_empty() {
        return Err(CliError::NoCards);
    }

    client.ping().await?;

    let deck = args.deck_name.as_deref().unwrap_or(&config.anki.deck_name);
    if client.decks().ensure_exists(deck).await? {
        writeln!(out, "已建立牌組 '{}'", deck)?;
    }

    let model = card_type.model_name();
    if !client.models().exists(model).await? {
        return Err(CliError::ModelMissing {
            model: model.to_string(),
            card_type: card_type.tag().to_string(),
        });
    }

    writeln!(out, "驗證 {} 張卡片資料...", records.len())?;
    let tags = build_tags(card_type, &config.template.tags, &args.tags);
    let notes = records
        .iter()
        .enumerate()
        .map(|(i, data)| {
            let card = create_card(card_type.tag(), data)
                .map_err(|source| CliError::InvalidCard { index: i + 1, source })?;
            let mut builder = NoteBuilder::new(deck, model)
                .fields(card.note_fields())
                .tags(tags.iter().cloned());
            if args.allow_duplicate {
                builder = builder.allow_duplicate(true);
            }
            Ok(builder.build())
        })
        .collect::<Result<Vec<Note>>>()?;

    if let [note] = notes.as_slice() {
        writeln!(out, "正在新增卡片到 Anki...")?;
        let id = client.notes().add(note.clone()).await?;
        info!(note_id = id, deck, "Added note");
        writeln!(out, "✓ 成功新增卡片 (ID: {})", id)?;
        return Ok(());
    }

    writeln!(out, "正在批次新增 {} 張卡片到 Anki...", notes.len())?;
    let ids = client.notes().add_many(&notes).await?;
    let rejected: Vec<usize> = ids
        .iter()
        .enumerate()
        .filter(|(_, id)| **id == REJECTED_NOTE_ID)
        .map(|(i, _)| i + 1)
        .collect();
    let added = ids.len() - rejected.len();

    info!(added, rejected = rejected.len(), deck, "Added notes");
    writeln!(out, "✓ 成功新增 {}/{} 張卡片", added, notes.len())?;
    if !rejected.is_empty() {
        warn!(?rejected, "Anki rejected some notes");
        let list: Vec<String> = rejected.iter().map(|i| format!("#{}", i)).collect();
        writeln!(out, "未能新增的卡片: {}", list.join(", "))?;
    }
    Ok(())
}

/// Tags for new notes: the tool tag, the card type, the configured tags and
/// the `--tag` values, without duplicates and in that order.
pub fn build_tags(card_type: CardType, configured: &[String], extra: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let candidates = [TOOL_TAG, card_type.tag()]
        .into_iter()
        .chain(configured.iter().map(String::as_str))
        .chain(extra.iter().map(String::as_str));
    for tag in candidates {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
