// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for code that publishes events
//!
//! ```ignore
//! let bus = TestEventBus::new();
//! signup(&bus, "jane").await?;
//! bus.assert()
//!     .assert_published_once("user.created")
//!     .assert_event_before("user.created", "email.queued");
//! ```
//!
//! Assertions panic with a descriptive message, like `assert!`.

use crate::context::Context;
use crate::events::{Event, EventBus, EventRef, HandlerFn, HandlerRef};
use std::ops::Deref;
use std::sync::{Arc, RwLock, RwLockReadGuard};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Thread-safe log of dispatched events
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<RwLock<Vec<EventRef>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: EventRef) {
        self.events
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    /// Handler that records every event it receives
    pub fn handler(&self) -> HandlerRef {
        let recorder = self.clone();
        HandlerFn::arc(move |_ctx: Context, event: EventRef| {
            recorder.record(event);
            async { Ok(()) }
        })
    }

    /// Snapshot of all recorded events, oldest first
    pub fn events(&self) -> Vec<EventRef> {
        self.read().clone()
    }

    pub fn events_named(&self, name: &str) -> Vec<EventRef> {
        self.read()
            .iter()
            .filter(|e| e.event_name() == name)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.read().iter().filter(|e| e.event_name() == name).count()
    }

    pub fn clear(&self) {
        self.events
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    pub fn first(&self) -> Option<EventRef> {
        self.read().first().cloned()
    }

    pub fn last(&self) -> Option<EventRef> {
        self.read().last().cloned()
    }

    fn names(&self) -> Vec<String> {
        self.read().iter().map(|e| e.event_name()).collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<EventRef>> {
        self.events.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for EventRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRecorder")
            .field("events", &self.names())
            .finish()
    }
}

/// Chainable assertions over an [`EventRecorder`]
pub struct EventAssertion<'a> {
    recorder: &'a EventRecorder,
}

impl<'a> EventAssertion<'a> {
    pub fn new(recorder: &'a EventRecorder) -> Self {
        Self { recorder }
    }

    pub fn assert_published(&self, name: &str) -> &Self {
        assert!(
            self.recorder.count_named(name) > 0,
            "expected event {name:?} to be published, got {:?}",
            self.recorder.names()
        );
        self
    }

    pub fn assert_not_published(&self, name: &str) -> &Self {
        assert!(
            self.recorder.count_named(name) == 0,
            "expected event {name:?} not to be published, but it was"
        );
        self
    }

    pub fn assert_published_times(&self, name: &str, times: usize) -> &Self {
        let count = self.recorder.count_named(name);
        assert!(
            count == times,
            "expected event {name:?} to be published {times} times, was published {count} times"
        );
        self
    }

    pub fn assert_published_once(&self, name: &str) -> &Self {
        self.assert_published_times(name, 1)
    }

    /// Some event named `name` has concrete type `T` and satisfies `check`
    pub fn assert_published_matching<T, F>(&self, name: &str, check: F) -> &Self
    where
        T: Event,
        F: Fn(&T) -> bool,
    {
        let events = self.recorder.events_named(name);
        assert!(!events.is_empty(), "expected event {name:?} to be published, but it was not");
        let found = events
            .iter()
            .filter_map(|e| e.downcast_ref::<T>())
            .any(check);
        assert!(found, "expected event {name:?} with a matching payload, none found");
        self
    }

    pub fn assert_count(&self, expected: usize) -> &Self {
        let count = self.recorder.count();
        assert!(count == expected, "expected {expected} events, got {count}");
        self
    }

    pub fn assert_empty(&self) -> &Self {
        self.assert_count(0)
    }

    /// `names` appear as a subsequence of the recorded events
    pub fn assert_events_in_order(&self, names: &[&str]) -> &Self {
        let recorded = self.recorder.names();
        assert!(
            recorded.len() >= names.len(),
            "expected at least {} events, got {}",
            names.len(),
            recorded.len()
        );

        let mut expected = names.iter().peekable();
        for name in &recorded {
            if expected.peek().is_some_and(|n| **n == name.as_str()) {
                expected.next();
            }
        }
        assert!(
            expected.peek().is_none(),
            "events not in expected order: expected {names:?}, got {recorded:?}"
        );
        self
    }

    /// First `a` was published before first `b`
    pub fn assert_event_before(&self, a: &str, b: &str) -> &Self {
        let recorded = self.recorder.names();
        let index_of = |name: &str| recorded.iter().position(|n| n == name);

        let Some(index_a) = index_of(a) else {
            return self.not_published(a);
        };
        let Some(index_b) = index_of(b) else {
            return self.not_published(b);
        };
        assert!(
            index_a < index_b,
            "expected event {a:?} to be published before {b:?}"
        );
        self
    }

    pub fn assert_event_after(&self, a: &str, b: &str) -> &Self {
        self.assert_event_before(b, a)
    }

    /// The first event of each name shares one correlation id
    pub fn assert_correlation(&self, names: &[&str]) -> &Self {
        if names.len() < 2 {
            return self;
        }

        let mut expected: Option<String> = None;
        for name in names {
            let Some(event) = self.recorder.events_named(name).into_iter().next() else {
                return self.not_published(name);
            };
            let correlation = event
                .metadata()
                .map(|m| m.correlation_id.clone())
                .unwrap_or_default();
            match &expected {
                None => expected = Some(correlation),
                Some(want) => assert!(
                    *want == correlation,
                    "events do not share correlation id: expected {want:?}, got {correlation:?} for {name:?}"
                ),
            }
        }
        self
    }

    /// Poll until an event named `name` is recorded
    pub async fn wait_for_event(&self, name: &str, timeout: Duration) -> &Self {
        let found = self.poll(timeout, || self.recorder.count_named(name) > 0).await;
        assert!(found, "timed out waiting for event {name:?}");
        self
    }

    /// Poll until at least `count` events are recorded
    pub async fn wait_for_count(&self, count: usize, timeout: Duration) -> &Self {
        let found = self.poll(timeout, || self.recorder.count() >= count).await;
        assert!(
            found,
            "timed out waiting for {count} events, got {}",
            self.recorder.count()
        );
        self
    }

    async fn poll(&self, timeout: Duration, done: impl Fn() -> bool) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if done() {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    #[allow(clippy::panic)]
    fn not_published(&self, name: &str) -> ! {
        panic!("event {name:?} was not published")
    }
}

/// An [`EventBus`] with a recorder subscribed to `*`
///
/// Derefs to the bus, so it can be used anywhere a `&EventBus` is expected.
#[derive(Clone, Debug)]
pub struct TestEventBus {
    bus: EventBus,
    recorder: EventRecorder,
}

impl TestEventBus {
    pub fn new() -> Self {
        Self::with_bus(EventBus::new())
    }

    /// Attach a recorder to an existing bus
    pub fn with_bus(bus: EventBus) -> Self {
        let recorder = EventRecorder::new();
        bus.subscribe_handler("*", recorder.handler(), Default::default());
        Self { bus, recorder }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn recorder(&self) -> &EventRecorder {
        &self.recorder
    }

    pub fn assert(&self) -> EventAssertion<'_> {
        EventAssertion::new(&self.recorder)
    }

    /// Forget recorded events; subscriptions are kept
    pub fn clear(&self) {
        self.recorder.clear();
    }
}

impl Default for TestEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for TestEventBus {
    type Target = EventBus;

    fn deref(&self) -> &EventBus {
        &self.bus
    }
}

#[cfg(test)]
#[path = "testing_tests.rs"]
mod tests;
