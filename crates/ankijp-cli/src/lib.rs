//! Command line tool for authoring Japanese flashcards and pushing them into
//! Anki through the AnkiConnect add-on.
//!
//! The binary is a thin wrapper around [`commands::run`]: it parses
//! [`cli::Cli`], sets up logging and maps errors to the exit code. Keeping
//! the commands in a library lets them be driven from tests with any
//! writer and a mock AnkiConnect server.
//!
//! ```no_run
//! use clap::Parser;
//! use ankijp_cli::{Cli, commands};
//!
//! # async fn example() -> ankijp_cli::Result<()> {
//! let cli = Cli::parse_from(["anki-japanese-cli", "init", "verb"]);
//! commands::run(cli, &mut std::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
