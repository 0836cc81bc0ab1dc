//! Connection checks and user-facing diagnostics.
//!
//! Nothing here changes how requests behave. The helpers time a `version`
//! call, classify whatever went wrong, and turn that into advice a user can
//! act on.

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::Url;

use crate::client::AnkiClient;
use crate::error::Error;

/// AnkiWeb code of the AnkiConnect add-on.
pub const ANKICONNECT_ADDON_CODE: &str = "2055492159";

/// Outcome of a timed `version` call.
#[derive(Debug, Clone)]
pub struct ConnectionStatus {
    /// Whether AnkiConnect answered with a version number.
    pub connected: bool,
    /// The reported API version.
    pub version: Option<u32>,
    /// The failure, rendered as text.
    pub error: Option<String>,
    /// Wall time of the call, retries included.
    pub response_time: Duration,
    /// The endpoint that was checked.
    pub url: String,
}

/// Broad cause of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnosis {
    /// Nothing is listening on the endpoint.
    ConnectionRefused,
    /// The host name does not resolve.
    HostNotFound,
    /// The request timed out.
    Timeout,
    /// AnkiConnect answered with an error.
    RemoteApi,
    /// Anything else.
    Unknown,
}

impl Diagnosis {
    /// Classify an error, by variant where possible and by message otherwise.
    pub fn classify(err: &Error) -> Self {
        match err.root_cause() {
            Error::ConnectionRefused(_) => Diagnosis::ConnectionRefused,
            Error::HostNotFound(_) => Diagnosis::HostNotFound,
            Error::Timeout(_) => Diagnosis::Timeout,
            Error::AnkiConnect(_) => Diagnosis::RemoteApi,
            other => Self::from_message(&other.to_string()),
        }
    }

    /// Classify an error message by the substrings common transport
    /// failures carry.
    pub fn from_message(message: &str) -> Self {
        let message = message.to_lowercase();
        if message.contains("connection refused") {
            Diagnosis::ConnectionRefused
        } else if message.contains("no such host") || message.contains("dns error") {
            Diagnosis::HostNotFound
        } else if message.contains("timeout") || message.contains("timed out") {
            Diagnosis::Timeout
        } else if message.contains("api error") {
            Diagnosis::RemoteApi
        } else {
            Diagnosis::Unknown
        }
    }

    /// Suggested remedies, most likely first.
    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            Diagnosis::ConnectionRefused => &[
                "確認 Anki 是否已啟動",
                "確認 AnkiConnect 插件是否已安裝",
                "重新啟動 Anki",
            ],
            Diagnosis::HostNotFound => &["檢查連線 URL 是否正確", "檢查網路連線"],
            Diagnosis::Timeout => &[
                "Anki 可能正在處理其他請求，請稍後再試",
                "檢查 Anki 是否響應",
            ],
            Diagnosis::RemoteApi => &[
                "檢查 AnkiConnect 插件版本是否最新",
                "檢查請求參數是否正確",
            ],
            Diagnosis::Unknown => &[
                "確認 Anki 是否已啟動",
                "確認 AnkiConnect 插件是否已安裝",
                "檢查連線 URL 是否正確",
            ],
        }
    }
}

/// Render an error as one friendly line.
pub fn format_error(err: &Error) -> String {
    match Diagnosis::classify(err) {
        Diagnosis::ConnectionRefused => {
            "無法連線到 Anki。請確認 Anki 已啟動且 AnkiConnect 插件已安裝。".to_string()
        }
        Diagnosis::HostNotFound => "找不到 Anki 伺服器。請檢查連線 URL 是否正確。".to_string(),
        Diagnosis::Timeout => "連線到 Anki 逾時。請確認 Anki 是否正常運作。".to_string(),
        Diagnosis::RemoteApi => match err.remote_message() {
            Some(message) => format!("Anki API 錯誤: {}", message),
            None => "Anki API 發生錯誤。".to_string(),
        },
        Diagnosis::Unknown => format!("錯誤: {}", err),
    }
}

/// Build the multi-line diagnostics report for a connection status.
pub fn render_report(status: &ConnectionStatus) -> String {
    status.to_string()
}

impl fmt::Display for ConnectionStatus {
    /// The multi-line diagnostics report.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Anki Connect 連線診斷")?;
        writeln!(f, "====================")?;
        writeln!(f, "連線 URL: {}", self.url)?;
        writeln!(
            f,
            "連線狀態: {}",
            if self.connected {
                "已連線 ✓"
            } else {
                "未連線 ✗"
            }
        )?;
        writeln!(f, "回應時間: {} ms", self.response_time.as_millis())?;

        if self.connected {
            if let Some(version) = self.version {
                writeln!(f, "Anki Connect 版本: {}", version)?;
            }
            return Ok(());
        }

        let message = self.error.as_deref().unwrap_or_default();
        writeln!(f, "\n錯誤診斷:")?;
        writeln!(f, "錯誤訊息: {}", message)?;
        writeln!(f, "\n可能的解決方案:")?;
        for (i, suggestion) in Diagnosis::from_message(message)
            .suggestions()
            .iter()
            .enumerate()
        {
            writeln!(f, "{}. {}", i + 1, suggestion)?;
        }

        if Url::parse(&self.url).is_err() {
            writeln!(
                f,
                "\n連線 URL 格式不正確，請檢查設定檔中的 anki.connect_url 值"
            )?;
            writeln!(f, "預設值應為: {}", crate::client::DEFAULT_URL)?;
        }

        writeln!(f, "\n安裝 AnkiConnect 插件:")?;
        writeln!(f, "1. 在 Anki 中，點擊「工具」>「附加元件」")?;
        writeln!(f, "2. 點擊「取得附加元件」")?;
        writeln!(f, "3. 輸入代碼: {}", ANKICONNECT_ADDON_CODE)?;
        writeln!(f, "4. 重新啟動 Anki")
    }
}

impl AnkiClient {
    /// Time a `version` call and report the outcome.
    pub async fn check_connection(&self) -> ConnectionStatus {
        let started = Instant::now();
        let result = self.misc().version().await;
        let response_time = started.elapsed();

        match result {
            Ok(version) => ConnectionStatus {
                connected: true,
                version: Some(version),
                error: None,
                response_time,
                url: self.url().to_string(),
            },
            Err(err) => ConnectionStatus {
                connected: false,
                version: None,
                error: Some(err.to_string()),
                response_time,
                url: self.url().to_string(),
            },
        }
    }

    /// Check the connection and render the diagnostics report.
    pub async fn diagnose(&self) -> String {
        render_report(&self.check_connection().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_status(error: &str, url: &str) -> ConnectionStatus {
        ConnectionStatus {
            connected: false,
            version: None,
            error: Some(error.to_string()),
            response_time: Duration::from_millis(12),
            url: url.to_string(),
        }
    }

    #[test]
    fn classifies_by_variant() {
        let refused = Error::RetriesExhausted {
            attempts: 4,
            source: Box::new(Error::ConnectionRefused("http://localhost:8765".into())),
        };
        assert_eq!(Diagnosis::classify(&refused), Diagnosis::ConnectionRefused);
        assert_eq!(
            Diagnosis::classify(&Error::HostNotFound("http://nope:8765".into())),
            Diagnosis::HostNotFound
        );
        assert_eq!(
            Diagnosis::classify(&Error::Timeout("http://localhost:8765".into())),
            Diagnosis::Timeout
        );
        assert_eq!(
            Diagnosis::classify(&Error::AnkiConnect("model was not found".into())),
            Diagnosis::RemoteApi
        );
        assert_eq!(Diagnosis::classify(&Error::Status(502)), Diagnosis::Unknown);
    }

    #[test]
    fn classifies_by_message() {
        assert_eq!(
            Diagnosis::from_message("dial tcp: connection refused"),
            Diagnosis::ConnectionRefused
        );
        assert_eq!(
            Diagnosis::from_message("lookup anki: no such host"),
            Diagnosis::HostNotFound
        );
        assert_eq!(
            Diagnosis::from_message("Client.Timeout exceeded"),
            Diagnosis::Timeout
        );
        assert_eq!(
            Diagnosis::from_message("API error: duplicate"),
            Diagnosis::RemoteApi
        );
        assert_eq!(Diagnosis::from_message("something else"), Diagnosis::Unknown);
    }

    #[test]
    fn format_error_extracts_remote_message() {
        let err = Error::RetriesExhausted {
            attempts: 1,
            source: Box::new(Error::AnkiConnect(
                "cannot create note because it is a duplicate".into(),
            )),
        };

        assert_eq!(
            format_error(&err),
            "Anki API 錯誤: cannot create note because it is a duplicate"
        );
        assert!(format_error(&Error::ConnectionRefused("x".into())).contains("無法連線到 Anki"));
    }

    #[test]
    fn report_for_connected_status_shows_version() {
        let status = ConnectionStatus {
            connected: true,
            version: Some(6),
            error: None,
            response_time: Duration::from_millis(3),
            url: "http://localhost:8765".to_string(),
        };

        let report = render_report(&status);
        assert!(report.contains("已連線 ✓"));
        assert!(report.contains("Anki Connect 版本: 6"));
        assert!(!report.contains("可能的解決方案"));
        assert_eq!(status.to_string(), report);
    }

    #[test]
    fn report_for_refused_connection_lists_remedies() {
        let report = render_report(&failed_status(
            "connection refused by http://localhost:8765",
            "http://localhost:8765",
        ));

        assert!(report.contains("未連線 ✗"));
        assert!(report.contains("1. 確認 Anki 是否已啟動"));
        assert!(report.contains("3. 重新啟動 Anki"));
        assert!(report.contains(ANKICONNECT_ADDON_CODE));
        assert!(!report.contains("連線 URL 格式不正確"));
    }

    #[test]
    fn report_flags_unparseable_url() {
        let report = render_report(&failed_status("builder error", "not a url"));
        assert!(report.contains("連線 URL 格式不正確"));
    }
}
