//! Configuration loaded from TOML.
//!
//! Lookup order: the `--config` path, then `$XDG_CONFIG_HOME/wxdash/config.toml`
//! (missing is fine), then built-in defaults. Command-line flags are applied on
//! top by the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::openmeteo::{BASE_URL, USER_AGENT};
use crate::theme::Mode;
use crate::units::temperature::Unit;

const APP_DIR: &str = "wxdash";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "wxdash.log";
const DEFAULT_THEME_POLL_MS: u64 = 2000;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub unit: Unit,
    pub city: Option<String>,
    pub theme: Option<Mode>,
    pub theme_hint_file: Option<PathBuf>,
    pub theme_poll_ms: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            unit: Unit::Celsius,
            city: None,
            theme: None,
            theme_hint_file: None,
            theme_poll_ms: DEFAULT_THEME_POLL_MS,
            log_file: None,
        }
    }
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn theme_poll_interval(&self) -> Duration {
        Duration::from_millis(self.theme_poll_ms.max(100))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::cache_dir().map(|d| d.join(APP_DIR).join(LOG_FILE)))
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}
