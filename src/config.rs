//! Tool configuration
//!
//! Defaults, overridden by an optional TOML file, overridden by
//! `TYPEREG_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::patterns::DuplicatePolicy;

/// Prefix for environment overrides, e.g. `TYPEREG_LOG_JSON=true`
pub const ENV_PREFIX: &str = "TYPEREG_";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What registering an already-registered component name does
    pub duplicate_policy: DuplicatePolicy,
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            log_filter: "typereg=info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration, reading `path` if given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }
}
