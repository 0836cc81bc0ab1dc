//! Error types for the command line tool.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end a command with a non-zero exit.
#[derive(Debug, Error)]
pub enum CliError {
    /// The config file exists but could not be read or parsed.
    #[error("無法載入設定檔 '{}': {source}", .path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// What went wrong.
        source: ConfigSource,
    },

    /// The default config could not be written.
    #[error("無法建立設定檔案 '{}': {source}", .path.display())]
    ConfigWrite {
        /// Target path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config could not be rendered as TOML.
    #[error("無法產生設定檔內容: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No home directory to look for or write the config in.
    #[error("無法取得使用者家目錄")]
    NoHomeDir,

    /// The card data file could not be read.
    #[error("無法讀取檔案 '{}': {source}", .path.display())]
    ReadFile {
        /// Input path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The card data is not valid JSON of the expected shape.
    #[error("JSON 解析失敗: {0}")]
    Json(#[source] serde_json::Error),

    /// Neither `--json` nor `--file` was given.
    #[error("請提供卡片資料 (--json 或 --file)")]
    MissingInput,

    /// The input held no cards.
    #[error("沒有有效的卡片資料")]
    NoCards,

    /// A card in the input failed to decode or validate.
    #[error("卡片 #{index} 驗證失敗: {source}")]
    InvalidCard {
        /// 1-based position in the input.
        index: usize,
        /// The factory error.
        source: ankijp_cards::Error,
    },

    /// The model for this card type has not been created yet.
    #[error("模型 '{model}' 不存在。請先執行 'init {card_type}' 指令建立模型。")]
    ModelMissing {
        /// Model name.
        model: String,
        /// Card type tag.
        card_type: String,
    },

    /// `diagnose` found no running AnkiConnect.
    #[error("無法連線到 Anki Connect")]
    NotConnected,

    /// Card type or template error.
    #[error(transparent)]
    Cards(#[from] ankijp_cards::Error),

    /// AnkiConnect call failed.
    #[error("{}", ankijp::format_error(.0))]
    Anki(#[from] ankijp::Error),

    /// Writing command output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a config file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigSource {
    /// Reading the file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for the config schema.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
