// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `evbus match <pattern> <name>...` - Check event names against a pattern

use crate::error::CliError;
use clap::Args;
use evbus_core::EventPattern;
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct MatchArgs {
    /// Subscription pattern, e.g. "user.*" or "*" (must not be empty)
    pub pattern: String,

    /// Event names to test
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MatchResult {
    pub name: String,
    pub matched: bool,
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.matched { "match" } else { "no match" };
        write!(f, "{}: {}", self.name, verdict)
    }
}

/// Empty patterns are rejected; on a bus they would only match the empty name
pub fn check(args: &MatchArgs) -> Result<Vec<MatchResult>, CliError> {
    if args.pattern.is_empty() {
        return Err(CliError::empty_pattern());
    }

    let pattern = EventPattern::new(args.pattern.as_str());
    Ok(args
        .names
        .iter()
        .map(|name| MatchResult {
            name: name.clone(),
            matched: pattern.matches(name),
        })
        .collect())
}
