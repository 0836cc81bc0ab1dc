//! Command implementations.
//!
//! Each command writes its status lines to the given writer and returns an
//! error for anything that should end the process with a non-zero exit.

mod add;
mod config;
mod diagnose;
mod init;
mod preview;

use std::io::Write;
use std::path::Path;

use ankijp::AnkiClient;
use serde_json::{Map, Value};
use tracing::debug;

use crate::cli::{Cli, Command, InputArgs};
use crate::config::Config;
use crate::error::{CliError, Result};

pub use add::build_tags;

/// Run a parsed command line.
pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Command::Config(args) => config::run(cli.config.as_deref(), args.force, out),
        Command::Preview(args) => preview::run(&args, out),
        Command::Init(args) => {
            let (_, client) = connect(cli.config.as_deref(), cli.url.as_deref())?;
            init::run(&client, &args, out).await
        }
        Command::Add(args) => {
            let (config, client) = connect(cli.config.as_deref(), cli.url.as_deref())?;
            add::run(&client, &config, &args, out).await
        }
        Command::Diagnose => {
            let (_, client) = connect(cli.config.as_deref(), cli.url.as_deref())?;
            diagnose::run(&client, out).await
        }
    }
}

fn connect(config_path: Option<&Path>, url: Option<&str>) -> Result<(Config, AnkiClient)> {
    let config = Config::load(config_path)?;
    let client = config.client(url);
    debug!(url = client.url(), "Using AnkiConnect endpoint");
    Ok((config, client))
}

/// Read card data from `--json` or `--file`.
///
/// With `batch` the input must be a JSON array of objects, otherwise a
/// single object.
pub(crate) fn read_cards(
    input: &InputArgs,
    batch: bool,
    out: &mut dyn Write,
) -> Result<Vec<Map<String, Value>>> {
    let text = match (&input.json, &input.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => {
            writeln!(out, "從檔案 '{}' 讀取卡片資料...", path.display())?;
            read_file(path)?
        }
        (None, None) => return Err(CliError::MissingInput),
    };

    let cards = if batch {
        serde_json::from_str(&text).map_err(CliError::Json)?
    } else {
        vec![serde_json::from_str(&text).map_err(CliError::Json)?]
    };
    Ok(cards)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}
