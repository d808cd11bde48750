//! Configuration for the homework status bot.
//!
//! Tunables come from an optional TOML file, secrets from the environment.
//! The environment always wins over the file.

use crate::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the Practicum API OAuth token.
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the recipient chat id.
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
/// Environment variable pointing at an optional TOML settings file.
pub const CONFIG_PATH_VAR: &str = "HOMEWORK_BOT_CONFIG";

const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Top-level bot configuration.
///
/// The [`Debug`] impl redacts tokens so the struct is safe to log.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// OAuth token for the homework status API.
    pub practicum_token: Option<String>,
    /// Telegram bot token.
    pub telegram_token: Option<String>,
    /// Chat that receives every notification.
    pub telegram_chat_id: Option<String>,
    /// Status endpoint URL.
    pub endpoint: String,
    /// Telegram Bot API base URL.
    pub telegram_api_url: String,
    /// Pause between poll cycles, in seconds.
    pub retry_period_secs: u64,
    /// Upper bound for a single HTTP request, in seconds.
    pub request_timeout_secs: u64,
    /// Move the `from_date` cursor forward after each successful cycle.
    ///
    /// Off by default: the cursor stays at process start time and an
    /// unchanged remote state is reported again every cycle.
    pub advance_cursor: bool,
    /// Log sink settings.
    pub log: LogConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            practicum_token: None,
            telegram_token: None,
            telegram_chat_id: None,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_owned(),
            retry_period_secs: 600,
            request_timeout_secs: 30,
            advance_cursor: false,
            log: LogConfig::default(),
        }
    }
}

/// Log file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Active log file.
    pub path: PathBuf,
    /// Size ceiling in bytes before the file is rotated.
    pub max_bytes: u64,
    /// Number of rotated files to keep (`main.log.1` .. `main.log.N`).
    pub backups: usize,
    /// Default `EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("main.log"),
            max_bytes: 50_000_000,
            backups: 5,
            filter: "homework_bot=debug".to_owned(),
        }
    }
}

/// Validated secrets, produced only when every value is present.
///
/// Custom [`Debug`] redacts the tokens to prevent leakage in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field(
                "practicum_token",
                &self.practicum_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "telegram_token",
                &self.telegram_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period_secs", &self.retry_period_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("advance_cursor", &self.advance_cursor)
            .field("log", &self.log)
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

fn redact(s: &str) -> &str {
    if s.is_empty() { "" } else { "[REDACTED]" }
}

impl BotConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BotError::Config(e.to_string()))
    }

    /// Build the runtime configuration: `.env`, optional settings file, environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOMEWORK_BOT_CONFIG` names an unreadable or invalid file.
    pub fn load() -> Result<Self> {
        // A missing .env is normal in production.
        let _ = dotenv::dotenv();

        let mut config = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env_with(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Overlay secrets using `lookup` to resolve variable names.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(PRACTICUM_TOKEN_VAR) {
            self.practicum_token = Some(value);
        }
        if let Some(value) = lookup(TELEGRAM_TOKEN_VAR) {
            self.telegram_token = Some(value);
        }
        if let Some(value) = lookup(TELEGRAM_CHAT_ID_VAR) {
            self.telegram_chat_id = Some(value);
        }
    }

    /// Returns true iff every required identifier is present and non-blank.
    pub fn check_tokens(&self) -> bool {
        self.missing_tokens().is_empty()
    }

    /// Names of the required variables that are absent or blank.
    pub fn missing_tokens(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.practicum_token),
            (TELEGRAM_TOKEN_VAR, &self.telegram_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| non_blank(value).is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Returns validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::ConfigurationMissing`] naming every absent variable.
    pub fn credentials(&self) -> Result<Credentials> {
        match (
            non_blank(&self.practicum_token),
            non_blank(&self.telegram_token),
            non_blank(&self.telegram_chat_id),
        ) {
            (Some(practicum), Some(telegram), Some(chat_id)) => Ok(Credentials {
                practicum_token: practicum.to_owned(),
                telegram_token: telegram.to_owned(),
                telegram_chat_id: chat_id.to_owned(),
            }),
            _ => Err(BotError::ConfigurationMissing(
                self.missing_tokens()
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            )),
        }
    }

    /// Pause between cycles; never shorter than one second.
    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs.max(1))
    }

    /// Per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn full_config() -> BotConfig {
        let mut config = BotConfig::default();
        config.apply_env_with(env(&[
            (PRACTICUM_TOKEN_VAR, "p-token"),
            (TELEGRAM_TOKEN_VAR, "t-token"),
            (TELEGRAM_CHAT_ID_VAR, "42"),
        ]));
        config
    }

    #[test]
    fn defaults_match_observed_program() {
        let config = BotConfig::default();
        assert_eq!(config.retry_period(), Duration::from_secs(600));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.log.max_bytes, 50_000_000);
        assert_eq!(config.log.backups, 5);
        assert!(!config.advance_cursor);
    }

    #[test]
    fn check_tokens_passes_with_all_three() {
        assert!(full_config().check_tokens());
    }

    #[test]
    fn check_tokens_fails_when_any_is_absent() {
        for missing in [PRACTICUM_TOKEN_VAR, TELEGRAM_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR] {
            let mut config = full_config();
            match missing {
                PRACTICUM_TOKEN_VAR => config.practicum_token = None,
                TELEGRAM_TOKEN_VAR => config.telegram_token = None,
                _ => config.telegram_chat_id = None,
            }
            assert!(!config.check_tokens(), "{missing} absent should fail");
            assert_eq!(config.missing_tokens(), vec![missing]);
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut config = full_config();
        config.telegram_chat_id = Some("   ".to_owned());
        assert!(!config.check_tokens());
    }

    #[test]
    fn credentials_reports_every_missing_variable() {
        let config = BotConfig::default();
        let err = config.credentials().unwrap_err();
        match err {
            BotError::ConfigurationMissing(names) => assert_eq!(names.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn credentials_trims_values() {
        let mut config = full_config();
        config.practicum_token = Some(" p-token \n".to_owned());
        let creds = config.credentials().unwrap();
        assert_eq!(creds.practicum_token, "p-token");
        assert_eq!(creds.telegram_chat_id, "42");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = BotConfig {
            telegram_chat_id: Some("from-file".to_owned()),
            ..BotConfig::default()
        };
        config.apply_env_with(env(&[(TELEGRAM_CHAT_ID_VAR, "from-env")]));
        assert_eq!(config.telegram_chat_id.as_deref(), Some("from-env"));
    }

    #[test]
    fn from_file_reads_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.toml");
        std::fs::write(
            &path,
            "retry_period_secs = 60\nadvance_cursor = true\n\n[log]\nbackups = 2\n",
        )
        .unwrap();

        let config = BotConfig::from_file(&path).unwrap();
        assert_eq!(config.retry_period_secs, 60);
        assert!(config.advance_cursor);
        assert_eq!(config.log.backups, 2);
        assert_eq!(config.log.max_bytes, 50_000_000);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();
        assert!(matches!(
            BotConfig::from_file(&path),
            Err(BotError::Config(_))
        ));
    }

    #[test]
    fn from_file_nonexistent_returns_io_error() {
        let result = BotConfig::from_file(Path::new("/nonexistent/path/bot.toml"));
        assert!(matches!(result, Err(BotError::Io(_))));
    }

    #[test]
    fn retry_period_is_never_zero() {
        let config = BotConfig {
            retry_period_secs: 0,
            ..BotConfig::default()
        };
        assert_eq!(config.retry_period(), Duration::from_secs(1));
    }

    #[test]
    fn debug_redacts_values() {
        let mut config = BotConfig::default();
        config.apply_env_with(env(&[
            (PRACTICUM_TOKEN_VAR, "PTOKEN"),
            (TELEGRAM_TOKEN_VAR, "123:SECRET"),
            (TELEGRAM_CHAT_ID_VAR, "42"),
        ]));
        let credentials = config.credentials().unwrap();

        for debug in [format!("{config:?}"), format!("{credentials:?}")] {
            assert!(!debug.contains("PTOKEN"), "{debug}");
            assert!(!debug.contains("SECRET"), "{debug}");
            assert!(debug.contains("[REDACTED]"));
            assert!(debug.contains("42"));
        }
    }

    #[test]
    fn request_timeout_is_never_zero() {
        let config = BotConfig {
            request_timeout_secs: 0,
            ..BotConfig::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
