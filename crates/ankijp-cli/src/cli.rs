//! Command line arguments.

use std::convert::Infallible;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Author Japanese vocabulary flashcards and push them into Anki.
#[derive(Parser, Debug)]
#[command(name = "anki-japanese-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./.anki-japanese-cli.toml, then ~/.anki-japanese-cli.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// AnkiConnect URL, overriding the config file
    #[arg(long, global = true, env = "ANKI_CONNECT_URL")]
    pub url: Option<String>,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the Anki model and deck for a card type
    Init(InitArgs),
    /// Add one or more cards to Anki
    Add(AddArgs),
    /// Render a card locally without sending it to Anki
    Preview(PreviewArgs),
    /// Check the connection to AnkiConnect
    Diagnose,
    /// Write the default config file to the home directory
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Card type: verb, adjective, normal or grammar
    #[arg(value_parser = card_type_tag)]
    pub card_type: String,

    /// Deck to prepare (default: the card type's own deck)
    #[arg(long, alias = "deckName")]
    pub deck_name: Option<String>,

    /// Push the bundled templates to an existing model
    #[arg(long)]
    pub update_templates: bool,
}

/// Where card data comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Card data as a JSON object
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,

    /// Path to a JSON file with card data
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Card type: verb, adjective, normal or grammar
    #[arg(value_parser = card_type_tag)]
    pub card_type: String,

    /// Target deck (default: anki.deck_name from the config)
    #[arg(long, alias = "deckName")]
    pub deck_name: Option<String>,

    #[command(flatten)]
    pub input: InputArgs,

    /// Read a JSON array of cards instead of a single object
    #[arg(short, long)]
    pub batch: bool,

    /// Extra tag for the new notes (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Let Anki add notes that duplicate existing ones
    #[arg(long)]
    pub allow_duplicate: bool,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Card type: verb, adjective, normal or grammar
    #[arg(value_parser = card_type_tag)]
    pub card_type: String,

    #[command(flatten)]
    pub input: InputArgs,

    /// Which face to render
    #[arg(long, value_enum, default_value_t = PreviewSide::Both)]
    pub side: PreviewSide,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSide {
    Front,
    Back,
    Both,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Card type tags are matched in lower case.
fn card_type_tag(value: &str) -> Result<String, Infallible> {
    Ok(value.to_lowercase())
}
