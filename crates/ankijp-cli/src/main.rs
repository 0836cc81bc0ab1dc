//! anki-japanese-cli: Japanese flashcards for Anki.

use std::process::ExitCode;

use ankijp_cli::{Cli, commands};
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    debug!(command = ?cli.command, "Starting anki-japanese-cli");

    let mut stdout = std::io::stdout();
    match commands::run(cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("錯誤: {}", err);
            ExitCode::FAILURE
        }
    }
}
