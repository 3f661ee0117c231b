//! Application-level configuration loading: quote provider access and game timing.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "QUOTE_GAME_CONFIG_PATH";

const DEFAULT_QUOTE_API_BASE_URL: &str = "https://dummyjson.com";
const DEFAULT_QUOTE_API_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_ANSWER_WINDOW_SECS: u64 = 60;

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub quote_api: QuoteApiConfig,
    /// How long a game accepts answers after it was generated.
    pub answer_window: Duration,
}

/// Where and how to reach the external quote provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        quote_api = %app_config.quote_api.base_url,
                        answer_window_secs = app_config.answer_window.as_secs(),
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON configuration document. Missing keys take their default value.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    quote_api: RawQuoteApi,
    game: RawGame,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawQuoteApi {
    base_url: String,
    timeout_ms: u64,
}

impl Default for RawQuoteApi {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_QUOTE_API_BASE_URL.into(),
            timeout_ms: DEFAULT_QUOTE_API_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawGame {
    answer_window_secs: u64,
}

impl Default for RawGame {
    fn default() -> Self {
        Self {
            answer_window_secs: DEFAULT_ANSWER_WINDOW_SECS,
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            quote_api: QuoteApiConfig {
                base_url: value.quote_api.base_url,
                timeout: Duration::from_millis(value.quote_api.timeout_ms),
            },
            answer_window: Duration::from_secs(value.game.answer_window_secs),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
