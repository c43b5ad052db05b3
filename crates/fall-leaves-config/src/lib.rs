//! Configuration for the Fall Leaves screensaver.
//!
//! Settings are read from `config.toml` in the platform configuration
//! directory. Every key is optional; a missing file means all defaults.
//! The file is only ever read.
//!
//! ```toml
//! background = [16, 16, 20]
//! seed = 2011
//!
//! [field]
//! leaf_count = 35
//! size_ratio = 0.2
//!
//! [log]
//! enabled = true
//! level = "debug"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use fall_leaves_core::{FieldSettings, SettingsError};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Failures while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    #[error("invalid field settings")]
    Invalid(#[from] SettingsError),
}

/// Logging options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Write a log file.
    pub enabled: bool,
    /// `tracing` filter directive, e.g. `info` or `fall_leaves_field=debug`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

/// Complete screensaver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub field: FieldSettings,
    /// Colour the view is cleared to each frame.
    pub background: [u8; 3],
    /// Fixed random seed; a time-based seed is used when absent.
    pub seed: Option<u64>,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: FieldSettings::default(),
            background: [16, 16, 20],
            seed: None,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.field.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), "loading configuration");
                Self::from_toml_str(&text)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load from the platform configuration directory.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }
}

/// Project directories for the screensaver, if a home directory is known.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "fall-leaves")
}

/// Where [`Config::load`] looks for its file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
