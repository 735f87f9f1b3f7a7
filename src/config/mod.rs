use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default poll interval for the event loop
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

fn default_tick_rate() -> u64 {
    DEFAULT_TICK_RATE_MS
}

/// Startup settings. Read once, never written back.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Initial coffee mass, passed through the same parsing as the input field
    pub coffee_grams: Option<i64>,

    /// Initial pour count
    pub pours: Option<i64>,

    /// Event loop poll interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    /// Optional kitty-style colour file overriding the default palette
    pub theme_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            coffee_grams: None,
            pours: None,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            theme_file: None,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("perfect-pour").join("config.toml"))
    }

    /// Load config from the user config directory, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return AppConfig::default();
        };

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return AppConfig::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}", e);
                AppConfig::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
