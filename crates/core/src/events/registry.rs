// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared bus state: handler entries, middleware and the closed flag
//!
//! Every field lives behind the single `RwLock` owned by the bus. Entries
//! stay sorted by descending priority; ties keep registration order.

use super::handler::HandlerRef;
use super::middleware::Middleware;
use super::pattern::EventPattern;

/// A registered handler with its dispatch options
#[derive(Clone)]
pub(crate) struct HandlerEntry {
    pub id: String,
    pub pattern: EventPattern,
    pub handler: HandlerRef,
    pub priority: i32,
    pub is_async: bool,
}

#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<HandlerEntry>,
    middleware: Vec<Middleware>,
    closed: bool,
}

impl Registry {
    /// Append and re-sort; `sort_by` is stable so equal priorities keep
    /// insertion order
    pub fn insert(&mut self, entry: HandlerEntry) {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Remove the first entry with `id`; returns whether one was found
    pub fn remove(&mut self, id: &str) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Entries whose pattern matches `event_name`, in dispatch order
    pub fn matching(&self, event_name: &str) -> Vec<HandlerEntry> {
        self.entries
            .iter()
            .filter(|e| e.pattern.matches(event_name))
            .cloned()
            .collect()
    }

    pub fn has_match(&self, event_name: &str) -> bool {
        self.entries.iter().any(|e| e.pattern.matches(event_name))
    }

    pub fn push_middleware(&mut self, middleware: Middleware) {
        self.middleware.push(middleware);
    }

    pub fn middleware(&self) -> Vec<Middleware> {
        self.middleware.clone()
    }

    /// Drop all entries and middleware; the closed flag is kept
    pub fn clear(&mut self) {
        self.entries.clear();
        self.middleware.clear();
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn middleware_len(&self) -> usize {
        self.middleware.len()
    }

    #[cfg(test)]
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
