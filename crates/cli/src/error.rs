// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing errors with context and suggestions.

use evbus_core::ConfigError;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for display on stderr.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The `--config` file could not be read or parsed
    pub fn config(path: &Path, err: ConfigError) -> Self {
        let error = CliError::new(format!("Failed to load config '{}'", path.display()))
            .with_context(err.to_string());
        let error = match err {
            ConfigError::Io { .. } => error
                .with_suggestion("Check that the file exists and is readable")
                .with_suggestion("Omit --config to run with the defaults"),
            _ => error
                .with_suggestion("Print the defaults as a starting point: evbus config")
                .with_suggestion("Durations use humantime syntax, e.g. slow_threshold = \"250ms\""),
        };
        error.with_source(err)
    }

    /// A pattern that can never match anything but the empty name
    pub fn empty_pattern() -> Self {
        CliError::new("Pattern is empty")
            .with_context("An empty pattern only matches an empty event name")
            .with_suggestion("Use '*' to match every event")
            .with_suggestion("Use 'user.*' to match one segment after 'user'")
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
