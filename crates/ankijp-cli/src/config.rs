//! Configuration file loading.
//!
//! The config lives in `.anki-japanese-cli.toml`. It is looked up in the
//! current directory first, then in the home directory; `--config` names a
//! file explicitly. Every key is optional:
//!
//! ```toml
//! [anki]
//! connect_url = "http://localhost:8765"
//! deck_name = "日文學習"
//! timeout_secs = 30
//! retries = 3
//! retry_delay_ms = 1000
//!
//! [template]
//! tags = ["japanese", "vocabulary"]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use ankijp::AnkiClient;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, ConfigSource, Result};

/// File name of the config file.
pub const CONFIG_FILE_NAME: &str = ".anki-japanese-cli.toml";

/// Root of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Connection settings.
    pub anki: AnkiConfig,
    /// Note settings.
    pub template: TemplateConfig,
}

/// The `[anki]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnkiConfig {
    /// AnkiConnect endpoint.
    pub connect_url: String,
    /// Deck that `add` uses when `--deck-name` is not given.
    pub deck_name: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Additional attempts after a failed request.
    pub retries: u32,
    /// Pause between attempts in milliseconds.
    pub retry_delay_ms: u64,
    /// AnkiConnect API key, when the add-on requires one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            connect_url: ankijp::client::DEFAULT_URL.to_string(),
            deck_name: "日文學習".to_string(),
            timeout_secs: 30,
            retries: 3,
            retry_delay_ms: 1000,
            api_key: None,
        }
    }
}

/// The `[template]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Tags added to every note.
    pub tags: Vec<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            tags: vec!["japanese".to_string(), "vocabulary".to_string()],
        }
    }
}

impl Config {
    /// Load a config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            source: ConfigSource::Io(e),
        })?;
        Self::parse(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            source: ConfigSource::Toml(e),
        })
    }

    /// Parse config TOML.
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load the config the way the binary does.
    ///
    /// An explicit path must exist. Otherwise the first of `./.anki-japanese-cli.toml`
    /// and `~/.anki-japanese-cli.toml` that exists is used, and the defaults
    /// apply when neither does.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match discover() {
            Some(path) => {
                debug!(path = %path.display(), "Loading config");
                Self::from_file(path)
            }
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Serialize as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build a client from the `[anki]` table. `url` overrides `connect_url`.
    pub fn client(&self, url: Option<&str>) -> AnkiClient {
        let anki = &self.anki;
        let mut builder = AnkiClient::builder()
            .url(url.unwrap_or(&anki.connect_url))
            .timeout(Duration::from_secs(anki.timeout_secs))
            .retries(anki.retries)
            .retry_delay(Duration::from_millis(anki.retry_delay_ms));
        if let Some(key) = &anki.api_key {
            builder = builder.api_key(key);
        }
        builder.build()
    }
}

/// Path of the config file in the home directory.
pub fn home_config_path() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
        .ok_or(CliError::NoHomeDir)
}

fn discover() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    home_config_path().ok().filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.anki.connect_url, "http://localhost:8765");
        assert_eq!(config.anki.deck_name, "日文學習");
        assert_eq!(config.anki.retries, 3);
        assert_eq!(config.template.tags, vec!["japanese", "vocabulary"]);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
[anki]
deck_name = "N5"
"#,
        )
        .unwrap();

        assert_eq!(config.anki.deck_name, "N5");
        assert_eq!(config.anki.connect_url, "http://localhost:8765");
        assert_eq!(config.anki.timeout_secs, 30);
        assert_eq!(config.template, TemplateConfig::default());
    }

    #[test]
    fn default_toml_round_trips() {
        let text = Config::default().to_toml().unwrap();
        assert!(text.contains("connect_url"));
        assert!(!text.contains("api_key"));
        assert_eq!(Config::parse(&text).unwrap(), Config::default());
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[anki\nretries = 'x'").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/ankijp.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }
}
