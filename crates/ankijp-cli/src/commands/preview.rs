//! `preview`: render a card locally.

use std::io::Write;

use ankijp_cards::CardRenderer;

use crate::cli::{PreviewArgs, PreviewSide};
use crate::error::{CliError, Result};

use super::read_cards;

pub(crate) fn run(args: &PreviewArgs, out: &mut dyn Write) -> Result<()> {
    let card_type = ankijp_cards::validate_card_type(&args.card_type)?;
    let data = read_cards(&args.input, false, out)?
        .pop()
        .ok_or(CliError::NoCards)?;

    let renderer = CardRenderer::new()?;
    let card = renderer.render(card_type.tag(), &data)?;

    if matches!(args.side, PreviewSide::Front | PreviewSide::Both) {
        writeln!(out, "--- 正面 ---")?;
        writeln!(out, "{}", card.front)?;
    }
    if args.side == PreviewSide::Both {
        writeln!(out)?;
    }
    if matches!(args.side, PreviewSide::Back | PreviewSide::Both) {
        writeln!(out, "--- 背面 ---")?;
        writeln!(out, "{}", card.back)?;
    }
    Ok(())
}
