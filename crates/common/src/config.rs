//! Bot configuration: credentials, base URL and receive window.
//!
//! Read from a JSON file when one exists, otherwise from environment
//! variables (a `.env` file is honoured).

use std::path::Path;

use auth::{ApiCredentials, DEFAULT_RECV_WINDOW};
use serde::Deserialize;

use crate::environment::FuturesEnvironment;
use crate::error::ConfigError;

/// Default location of the JSON config file.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// On-disk shape, keyed the same way as the environment variables.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(rename = "API_KEY")]
    api_key: Option<String>,
    #[serde(rename = "API_SECRET")]
    api_secret: Option<String>,
    #[serde(rename = "BASE_URL")]
    base_url: Option<String>,
    #[serde(rename = "RECV_WINDOW")]
    recv_window: Option<u64>,
}

/// Everything needed to construct an authenticated client.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub credentials: ApiCredentials,
    pub base_url: String,
    pub recv_window: u64,
}

impl BotConfig {
    /// Load from `path` if it exists, otherwise from the environment.
    ///
    /// # Errors
    /// `ConfigError::MissingCredential` when the key or secret is absent,
    /// or a read/parse error for a file that exists but is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!(path = %path.display(), "Loading config file");
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using environment");
            Self::from_env()
        }
    }

    /// Load from a JSON file with `API_KEY`, `API_SECRET`, `BASE_URL`, `RECV_WINDOW`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        Self::from_json(&contents).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: display,
                source,
            },
            other => other,
        })
    }

    /// Parse a JSON document.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
                path: "<inline>".to_string(),
                source,
            })?;
        Self::from_raw(raw)
    }

    /// Load from `API_KEY`, `API_SECRET`, `BASE_URL`, `RECV_WINDOW`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, map, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let recv_window = match lookup("RECV_WINDOW") {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "RECV_WINDOW",
                    value,
                }
            })?),
            None => None,
        };

        Self::from_raw(RawConfig {
            api_key: lookup("API_KEY"),
            api_secret: lookup("API_SECRET"),
            base_url: lookup("BASE_URL"),
            recv_window,
        })
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let api_key = raw
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingCredential("API_KEY"))?;
        let api_secret = raw
            .api_secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingCredential("API_SECRET"))?;

        let base_url = raw
            .base_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| FuturesEnvironment::from_env().rest_base_url().to_string());

        Ok(Self {
            credentials: ApiCredentials::try_new(api_key, api_secret)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            recv_window: raw.recv_window.unwrap_or(DEFAULT_RECV_WINDOW),
        })
    }
}
