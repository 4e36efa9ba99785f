// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `evbus config` - Print the effective configuration

use crate::error::CliError;
use crate::output::OutputFormat;
use evbus_core::BusConfig;
use std::path::Path;

/// Load `path`, or the defaults when no file was given
pub fn load(path: Option<&Path>) -> Result<BusConfig, CliError> {
    match path {
        Some(path) => BusConfig::load(path).map_err(|e| CliError::config(path, e)),
        None => Ok(BusConfig::default()),
    }
}

pub fn render(config: &BusConfig, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(config.to_toml()?),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(config)?)),
    }
}
