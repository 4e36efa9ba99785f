// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bus configuration
//!
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! source = "user-service"
//!
//! [middleware]
//! logging = true
//! timing = true
//! slow_threshold = "250ms"
//! retry_attempts = 1
//!
//! [log]
//! level = "warn"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors loading or rendering configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusConfig {
    /// Source label stamped on events the bus wraps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub middleware: MiddlewareConfig,
    pub log: LogConfig,
}

/// Middleware installed by `EventBus::from_config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiddlewareConfig {
    pub logging: bool,
    pub timing: bool,
    /// Handlers slower than this are logged at warn by the timing middleware
    #[serde(with = "humantime_serde")]
    pub slow_threshold: Duration,
    /// Total attempts per handler; values above 1 install the retry middleware
    pub retry_attempts: u32,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            logging: false,
            timing: false,
            slow_threshold: Duration::from_millis(250),
            retry_attempts: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl BusConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
