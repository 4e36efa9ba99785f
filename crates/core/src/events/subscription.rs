// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscription options and handles

use super::pattern::EventPattern;
use super::registry::Registry;
use std::sync::{Arc, RwLock, Weak};
use tracing::debug;

/// Per-subscription dispatch options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubscribeOptions {
    pub priority: i32,
    pub is_async: bool,
}

impl SubscribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Higher priorities run first
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Run the handler on its own task; its result never reaches the publisher
    pub fn with_async(mut self) -> Self {
        self.is_async = true;
        self
    }
}

/// Handle to an active subscription
///
/// Holds only a weak reference to the bus: it neither owns the entry nor
/// keeps the bus alive.
#[derive(Clone, Debug)]
pub struct Subscription {
    id: String,
    pattern: EventPattern,
    registry: Weak<RwLock<Registry>>,
}

impl Subscription {
    pub(crate) fn new(id: String, pattern: EventPattern, registry: Weak<RwLock<Registry>>) -> Self {
        Self {
            id,
            pattern,
            registry,
        }
    }

    /// Unique subscription id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Pattern this subscription listens to
    pub fn pattern(&self) -> &EventPattern {
        &self.pattern
    }

    /// Whether this subscription was issued by the bus owning `registry`
    pub(crate) fn belongs_to(&self, registry: &Arc<RwLock<Registry>>) -> bool {
        Weak::ptr_eq(&self.registry, &Arc::downgrade(registry))
    }

    /// Remove this subscription from its bus
    ///
    /// No-op if it was already removed or the bus is gone.
    pub fn unsubscribe(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = registry
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.id);
        if removed {
            debug!(id = %self.id, pattern = %self.pattern, "unsubscribed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_sync_priority_zero() {
        let opts = SubscribeOptions::new();
        assert_eq!(opts.priority, 0);
        assert!(!opts.is_async);
    }

    #[test]
    fn options_builder() {
        let opts = SubscribeOptions::new().with_priority(100).with_async();
        assert_eq!(opts.priority, 100);
        assert!(opts.is_async);
    }

    #[test]
    fn unsubscribe_after_bus_dropped_is_noop() {
        let registry = Arc::new(RwLock::new(Registry::default()));
        let sub = Subscription::new(
            "sub-1".to_string(),
            EventPattern::new("user.*"),
            Arc::downgrade(&registry),
        );
        drop(registry);

        sub.unsubscribe();
        assert_eq!(sub.id(), "sub-1");
        assert_eq!(sub.pattern().as_str(), "user.*");
    }
}
