// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event name pattern matching

/// Pattern for matching event names
/// Supports:
///   - Exact: "user.created"
///   - Single wildcard segment: "user.*" matches "user.created", "user.deleted"
///   - Leading wildcard: "*.created" matches "user.created", "order.created"
///   - Global: "*" matches every event
///
/// A `*` segment stands for exactly one segment. Wildcards never appear
/// inside a segment, so "user*" only matches the literal name "user*".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventPattern(String);

impl EventPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Check if this pattern matches an event name
    pub fn matches(&self, event_name: &str) -> bool {
        matches(&self.0, event_name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventPattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for EventPattern {
    fn from(pattern: String) -> Self {
        Self(pattern)
    }
}

impl std::fmt::Display for EventPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check if `pattern` matches `event_name`
pub fn matches(pattern: &str, event_name: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    // Empty pattern and empty name only match each other
    if pattern.is_empty() || event_name.is_empty() {
        return pattern == event_name;
    }

    let mut pattern_parts = pattern.split('.');
    let mut event_parts = event_name.split('.');
    loop {
        match (pattern_parts.next(), event_parts.next()) {
            (None, None) => return true,
            (Some("*"), Some(_)) => continue,
            (Some(p), Some(e)) if p == e => continue,
            _ => return false,
        }
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
