//! Application configuration.
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//! Environment variables override the file:
//!
//! | Variable | Effect |
//! |---|---|
//! | `HOOKWIRE_BASE_PATH` | replaces `base_path` |
//! | `SCRIPT_NAME` | when no base path is set, its directory becomes the base path |
//! | `HOOKWIRE_DEFAULT_PRIORITY` | replaces `default_priority` (ignored if not an integer) |

use crate::{bus::DEFAULT_PRIORITY, routing::BasePath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}")]
    Read {
        /// The file that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Config`].
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    /// The base path contains characters that cannot appear in a path prefix.
    #[error("invalid base path `{0}`")]
    InvalidBasePath(String),
}

/// Settings for an application built on hookwire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deployment prefix, e.g. `/cms`. Empty when served from `/`.
    pub base_path: String,
    /// Priority given to listeners registered without one.
    pub default_priority: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            default_priority: DEFAULT_PRIORITY,
        }
    }
}

impl Config {
    /// Parses TOML and validates the result.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.base_path()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(base) = lookup("HOOKWIRE_BASE_PATH") {
            self.base_path = BasePath::new(&base)?.as_str().to_string();
        } else if self.base_path.is_empty() {
            if let Some(script) = lookup("SCRIPT_NAME").filter(|s| !s.is_empty()) {
                self.base_path = BasePath::from_script_name(&script)?.as_str().to_string();
            }
        }

        if let Some(priority) = lookup("HOOKWIRE_DEFAULT_PRIORITY") {
            if let Ok(priority) = priority.trim().parse::<i32>() {
                self.default_priority = priority;
            }
        }
        Ok(())
    }

    /// The validated base path.
    pub fn base_path(&self) -> Result<BasePath, ConfigError> {
        BasePath::new(&self.base_path)
    }
}
