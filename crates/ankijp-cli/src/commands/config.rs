//! `config`: write the default config file.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::config::{Config, home_config_path};
use crate::error::{CliError, Result};

pub(crate) fn run(explicit: Option<&Path>, force: bool, out: &mut dyn Write) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => home_config_path()?,
    };

    if path.exists() && !force {
        writeln!(out, "設定檔案已存在於: {}", path.display())?;
        writeln!(out, "使用 --force 覆寫現有設定。")?;
        return Ok(());
    }

    let content = Config::default().to_toml()?;
    std::fs::write(&path, content).map_err(|source| CliError::ConfigWrite {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "Wrote config file");

    writeln!(out, "設定檔案已建立於: {}", path.display())?;
    writeln!(out, "您可以編輯此檔案來自訂設定。")?;
    Ok(())
}
