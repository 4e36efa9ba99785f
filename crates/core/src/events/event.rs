// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event contract, tracing metadata and the metadata envelope
//!
//! Any producer type with a name and an occurrence time is publishable.
//! Types that also return `Some` from [`Event::metadata`] are already
//! enveloped and pass through the bus untouched; everything else is wrapped
//! in a [`WrappedEvent`] carrying freshly generated metadata.

use crate::clock::{Clock, SystemClock};
use crate::id::{IdGen, UuidIdGen};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;

/// Shared handle to a dispatched event
pub type EventRef = Arc<dyn Event>;

/// Access to the concrete type behind a trait object
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A named occurrence with a timestamp
pub trait Event: AsAny + Send + Sync {
    /// Dot-segmented name subscriptions are matched against
    fn event_name(&self) -> String;

    /// When the occurrence happened
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Tracing metadata, if the event already carries it
    fn metadata(&self) -> Option<&EventMetadata> {
        None
    }
}

impl dyn Event {
    /// Borrow the producer's concrete event, looking through the envelope
    /// the bus adds to raw events.
    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        let any = self.as_any();
        if let Some(event) = any.downcast_ref::<T>() {
            return Some(event);
        }
        any.downcast_ref::<WrappedEvent>()
            .and_then(|wrapped| wrapped.inner().downcast_ref::<T>())
    }
}

/// Metadata for tracing and correlation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event id
    pub id: String,
    /// Links events belonging to one logical operation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub correlation_id: String,
    /// Id of the event that caused this one
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub causation_id: String,
    /// When the metadata was created
    pub timestamp: DateTime<Utc>,
    /// Module or service that created the event
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
}

/// Embeddable occurrence time plus metadata
///
/// Producer types hold a `BaseEvent` and forward `occurred_at`/`metadata`
/// to it, which marks them as already enveloped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseEvent {
    occurred_at: DateTime<Utc>,
    metadata: EventMetadata,
}

impl BaseEvent {
    pub fn new() -> Self {
        Self::new_with(&SystemClock, &UuidIdGen)
    }

    /// Build from an explicit clock and id source
    pub fn new_with(clock: &dyn Clock, ids: &dyn IdGen) -> Self {
        let now = clock.utc();
        Self {
            occurred_at: now,
            metadata: EventMetadata {
                id: ids.next(),
                timestamp: now,
                ..EventMetadata::default()
            },
        }
    }

    pub fn with_source(source: impl Into<String>) -> Self {
        let mut event = Self::new();
        event.metadata.source = source.into();
        event
    }

    pub fn with_correlation(
        correlation_id: impl Into<String>,
        causation_id: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        let mut event = Self::with_source(source);
        event.metadata.correlation_id = correlation_id.into();
        event.metadata.causation_id = causation_id.into();
        event
    }

    /// Follow-up event triggered by `parent`
    ///
    /// Keeps the parent's correlation id (or starts one from the parent id)
    /// and records the parent id as the cause.
    pub fn caused_by(parent: &EventMetadata, source: impl Into<String>) -> Self {
        let correlation = if parent.correlation_id.is_empty() {
            parent.id.clone()
        } else {
            parent.correlation_id.clone()
        };
        Self::with_correlation(correlation, parent.id.clone(), source)
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    pub fn set_correlation_id(&mut self, id: impl Into<String>) {
        self.metadata.correlation_id = id.into();
    }

    pub fn set_causation_id(&mut self, id: impl Into<String>) {
        self.metadata.causation_id = id.into();
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.metadata.source = source.into();
    }
}

impl Default for BaseEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Envelope pairing a raw event with generated metadata
pub struct WrappedEvent {
    inner: EventRef,
    metadata: EventMetadata,
}

impl WrappedEvent {
    /// The event as the producer published it
    pub fn inner(&self) -> &dyn Event {
        self.inner.as_ref()
    }
}

impl Event for WrappedEvent {
    fn event_name(&self) -> String {
        self.inner.event_name()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.inner.occurred_at()
    }

    fn metadata(&self) -> Option<&EventMetadata> {
        Some(&self.metadata)
    }
}

impl std::fmt::Debug for WrappedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrappedEvent")
            .field("name", &self.inner.event_name())
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Ensure the event carries metadata, generating ids with a UUID source
pub fn wrap(event: EventRef) -> EventRef {
    wrap_with(event, &UuidIdGen, None)
}

/// Ensure the event carries metadata
///
/// Events that already expose metadata are returned as-is.
pub fn wrap_with(event: EventRef, ids: &dyn IdGen, source: Option<&str>) -> EventRef {
    if event.metadata().is_some() {
        return event;
    }
    let metadata = EventMetadata {
        id: ids.next(),
        timestamp: event.occurred_at(),
        source: source.unwrap_or_default().to_string(),
        ..EventMetadata::default()
    };
    Arc::new(WrappedEvent {
        inner: event,
        metadata,
    })
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
