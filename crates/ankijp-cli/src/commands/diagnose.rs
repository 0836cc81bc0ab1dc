//! `diagnose`: report on the AnkiConnect connection.

use std::io::Write;

use ankijp::AnkiClient;
use ankijp::status::render_report;

use crate::error::{CliError, Result};

pub(crate) async fn run(client: &AnkiClient, out: &mut dyn Write) -> Result<()> {
    let status = client.check_connection().await;
    write!(out, "{}", render_report(&status))?;

    if status.connected {
        Ok(())
    } else {
        Err(CliError::NotConnected)
    }
}
