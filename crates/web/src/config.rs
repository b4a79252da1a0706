//! Front-end configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `PURPLEPAW_API_URL` | `http://localhost:8080/api` |
//! | `PURPLEPAW_TIMEOUT_MS` | `25000` |
//! | `PURPLEPAW_PAGE_SIZE` | `10` (must be > 0) |
//! | `PURPLEPAW_SEARCH_DEBOUNCE_MS` | `500` |
//! | `PURPLEPAW_LOG_FORMAT` | `pretty` (`json` or `pretty`) |
//! | `PURPLEPAW_DATA_DIR` | OS data directory |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use purplepaw_api::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use purplepaw_observability::LogFormat;
use purplepaw_table::DEFAULT_DEBOUNCE;

pub const API_URL: &str = "PURPLEPAW_API_URL";
pub const TIMEOUT_MS: &str = "PURPLEPAW_TIMEOUT_MS";
pub const PAGE_SIZE: &str = "PURPLEPAW_PAGE_SIZE";
pub const SEARCH_DEBOUNCE_MS: &str = "PURPLEPAW_SEARCH_DEBOUNCE_MS";
pub const LOG_FORMAT: &str = "PURPLEPAW_LOG_FORMAT";
pub const DATA_DIR: &str = "PURPLEPAW_DATA_DIR";

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub page_size: u32,
    pub search_debounce: Duration,
    pub log_format: LogFormat,
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_DEBOUNCE,
            log_format: LogFormat::default(),
            data_dir: None,
        }
    }
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}

impl ClientConfig {
    /// Build from a variable lookup. Unset or blank variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(url) = get(API_URL) {
            cfg.api_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = get(TIMEOUT_MS) {
            cfg.timeout = Duration::from_millis(parse(TIMEOUT_MS, &raw)?);
        }
        if let Some(raw) = get(PAGE_SIZE) {
            let size: u32 = parse(PAGE_SIZE, &raw)?;
            if size == 0 {
                return Err(ConfigError::Invalid {
                    key: PAGE_SIZE,
                    value: raw,
                });
            }
            cfg.page_size = size;
        }
        if let Some(raw) = get(SEARCH_DEBOUNCE_MS) {
            cfg.search_debounce = Duration::from_millis(parse(SEARCH_DEBOUNCE_MS, &raw)?);
        }
        if let Some(raw) = get(LOG_FORMAT) {
            cfg.log_format = parse(LOG_FORMAT, &raw)?;
        }
        if let Some(dir) = get(DATA_DIR) {
            cfg.data_dir = Some(PathBuf::from(dir));
        }

        Ok(cfg)
    }

    /// Process environment, after loading `.env` if one exists.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.api_url.clone(),
            timeout: self.timeout,
        }
    }
}
