//! Runtime configuration.
//!
//! Values are layered from lowest to highest precedence: built-in defaults, the TOML config
//! file, the environment (`GIPHY_API_KEY`, optionally from a `.env` file) and command-line
//! overrides.

use crate::debounce::DEFAULT_DEBOUNCE_MS;
use crate::error::{GiflensError, Result};
use crate::render::ui::ThemeName;
use crate::search::DEFAULT_ENDPOINT;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GIPHY_API_KEY";
/// Request timeout used when nothing overrides it.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub endpoint: String,
    pub debounce_delay: Duration,
    pub request_timeout: Duration,
    pub theme: ThemeName,
}

/// Contents of `config.toml`; every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub debounce_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub theme: Option<ThemeName>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub debounce_ms: Option<u64>,
    pub theme: Option<ThemeName>,
}

impl FileConfig {
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| GiflensError::config(err.to_string()))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            GiflensError::file_error(format!("cannot read {}", path.display()), err)
        })?;
        Self::parse(&contents)
    }
}

impl Config {
    /// Defaults plus the given key; handy for tests and embedding.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_delay: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            theme: ThemeName::default(),
        }
    }

    /// `$XDG_CONFIG_HOME/giflens/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("giflens").join("config.toml"))
    }

    /// Resolve the configuration from every layer.
    ///
    /// An explicit `--config` path must exist; the default path is skipped when absent.
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        dotenv::dotenv().ok();

        let file = match &overrides.config_path {
            Some(path) if !path.exists() => {
                return Err(GiflensError::ConfigNotFound { path: path.clone() })
            }
            Some(path) => FileConfig::read(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => FileConfig::read(&path)?,
                _ => FileConfig::default(),
            },
        };

        let env_api_key = std::env::var(API_KEY_ENV).ok();
        Self::from_layers(file, env_api_key, overrides)
    }

    /// Merge already-read layers.
    pub fn from_layers(
        file: FileConfig,
        env_api_key: Option<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let api_key = overrides
            .api_key
            .or(env_api_key)
            .or(file.api_key)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(GiflensError::MissingApiKey)?;

        let debounce_ms = overrides
            .debounce_ms
            .or(file.debounce_ms)
            .unwrap_or(DEFAULT_DEBOUNCE_MS);
        if debounce_ms == 0 {
            return Err(GiflensError::config("debounce_ms must be positive"));
        }

        let timeout_secs = file
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(GiflensError::config("request_timeout_secs must be positive"));
        }

        Ok(Self {
            api_key,
            endpoint: overrides
                .endpoint
                .or(file.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            debounce_delay: Duration::from_millis(debounce_ms),
            request_timeout: Duration::from_secs(timeout_secs),
            theme: overrides.theme.or(file.theme).unwrap_or_default(),
        })
    }
}
