// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus: subscription, dispatch and lifecycle
//!
//! ```text
//! publish(ctx, event)
//!   ├─► closed?                      ─► Err(Closed)
//!   ├─► wrap (adds metadata if missing)
//!   ├─► read lock: snapshot matching entries + middleware, unlock
//!   └─► for entry in priority order:
//!         ├─ ctx done?               ─► Err(Cancelled | DeadlineExceeded)
//!         ├─ handler = build_chain(entry.handler, middleware)
//!         ├─ async ─► tokio::spawn, result dropped
//!         └─ sync  ─► await inline, Err aborts the rest
//! ```
//!
//! Handlers never run while the lock is held, so they may publish,
//! subscribe or unsubscribe on the same bus.

use super::event::{wrap_with, Event, EventRef};
use super::handler::{HandlerFn, HandlerRef};
use super::middleware::{self, build_chain, Middleware};
use super::pattern::EventPattern;
use super::registry::{HandlerEntry, Registry};
use super::subscription::{SubscribeOptions, Subscription};
use crate::clock::SystemClock;
use crate::config::BusConfig;
use crate::context::Context;
use crate::error::{EventError, HandlerResult};
use crate::id::{IdGen, UuidIdGen};
use std::future::Future;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// In-process publish/subscribe bus
///
/// Cloning is cheap; clones share subscriptions, middleware and the closed
/// flag.
#[derive(Clone)]
pub struct EventBus {
    registry: Arc<RwLock<Registry>>,
    ids: Arc<dyn IdGen>,
    source: Option<Arc<str>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
            ids: Arc::new(UuidIdGen),
            source: None,
        }
    }

    /// Build a bus from configuration, installing configured middleware in
    /// the order logging, timing, retry
    pub fn from_config(config: &BusConfig) -> Self {
        let mut bus = Self::new();
        if let Some(source) = &config.source {
            bus = bus.with_source(source.as_str());
        }

        let mw = &config.middleware;
        if mw.logging {
            bus.use_middleware(middleware::logging());
        }
        if mw.timing {
            bus.use_middleware(middleware::timing(
                Arc::new(SystemClock),
                mw.slow_threshold,
            ));
        }
        if mw.retry_attempts > 1 {
            bus.use_middleware(middleware::retry(mw.retry_attempts));
        }
        bus
    }

    /// Use `ids` for subscription ids and generated event ids
    pub fn with_id_gen(mut self, ids: impl IdGen + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Source label stamped on events the bus wraps
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Subscribe a closure with default options (sync, priority 0)
    pub fn subscribe<F, Fut>(&self, pattern: impl Into<EventPattern>, handler: F) -> Subscription
    where
        F: Fn(Context, EventRef) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.subscribe_with(pattern, handler, SubscribeOptions::default())
    }

    /// Subscribe a closure with explicit options
    pub fn subscribe_with<F, Fut>(
        &self,
        pattern: impl Into<EventPattern>,
        handler: F,
        options: SubscribeOptions,
    ) -> Subscription
    where
        F: Fn(Context, EventRef) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.subscribe_handler(pattern, HandlerFn::arc(handler), options)
    }

    /// Subscribe a type-erased handler
    pub fn subscribe_handler(
        &self,
        pattern: impl Into<EventPattern>,
        handler: HandlerRef,
        options: SubscribeOptions,
    ) -> Subscription {
        let pattern = pattern.into();
        let id = self.ids.next();

        debug!(
            %id,
            %pattern,
            priority = options.priority,
            is_async = options.is_async,
            "subscribed"
        );

        self.write().insert(HandlerEntry {
            id: id.clone(),
            pattern: pattern.clone(),
            handler,
            priority: options.priority,
            is_async: options.is_async,
        });

        Subscription::new(id, pattern, Arc::downgrade(&self.registry))
    }

    /// Remove a subscription; no-op if it is not registered here
    pub fn unsubscribe(&self, subscription: &Subscription) {
        if !subscription.belongs_to(&self.registry) {
            return;
        }
        if self.write().remove(subscription.id()) {
            debug!(id = %subscription.id(), "unsubscribed");
        }
    }

    /// Append middleware; it applies to dispatches that start afterwards
    pub fn use_middleware(&self, middleware: Middleware) {
        self.write().push_middleware(middleware);
    }

    /// Append several middleware in order
    pub fn use_all(&self, middleware: impl IntoIterator<Item = Middleware>) {
        let mut registry = self.write();
        for m in middleware {
            registry.push_middleware(m);
        }
    }

    /// Dispatch an event to every matching handler
    ///
    /// Sync handlers run in priority order on the caller's task and the
    /// first error is returned unchanged. Async handlers are spawned and
    /// their results dropped. The context is checked before each handler.
    pub async fn publish<E: Event>(&self, ctx: &Context, event: E) -> Result<(), EventError> {
        self.publish_ref(ctx, Arc::new(event)).await
    }

    /// Dispatch an already shared event
    pub async fn publish_ref(&self, ctx: &Context, event: EventRef) -> Result<(), EventError> {
        let name = event.event_name();
        let (entries, middleware) = {
            let registry = self.read();
            if registry.is_closed() {
                return Err(EventError::Closed);
            }
            (registry.matching(&name), registry.middleware())
        };
        let event = wrap_with(event, self.ids.as_ref(), self.source.as_deref());

        trace!(%name, matched = entries.len(), "publishing");

        for entry in entries {
            if let Some(err) = ctx.err() {
                return Err(err);
            }

            let handler = build_chain(Arc::clone(&entry.handler), &middleware);

            if entry.is_async {
                let ctx = ctx.clone();
                let event = Arc::clone(&event);
                let id = entry.id;
                tokio::spawn(async move {
                    if let Err(e) = handler.handle(ctx, event).await {
                        debug!(subscription = %id, error = %e, "async handler failed");
                    }
                });
            } else {
                handler.handle(ctx.clone(), Arc::clone(&event)).await?;
            }
        }

        Ok(())
    }

    /// Fire-and-forget publish on a separate task
    ///
    /// The outcome is discarded. The handle is returned for callers that
    /// want to wait for dispatch (typically tests); dropping it is fine.
    /// Outside a tokio runtime there is nothing to spawn on, so the event is
    /// dropped and `None` is returned.
    pub fn publish_async<E: Event>(&self, ctx: &Context, event: E) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!(event = %event.event_name(), "no tokio runtime, async publish dropped");
            return None;
        };
        let bus = self.clone();
        let ctx = ctx.clone();
        let event: EventRef = Arc::new(event);
        Some(runtime.spawn(async move {
            let _ = bus.publish_ref(&ctx, event).await;
        }))
    }

    /// Whether any registered pattern matches `event_name`
    pub fn has_subscribers(&self, event_name: &str) -> bool {
        self.read().has_match(event_name)
    }

    /// Reject all further publishes; running async handlers are unaffected
    pub fn close(&self) {
        self.write().close();
        debug!("event bus closed");
    }

    pub fn is_closed(&self) -> bool {
        self.read().is_closed()
    }

    /// Remove all handlers and middleware without closing the bus
    pub fn clear(&self) {
        self.write().clear();
        debug!("event bus cleared");
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.read();
        f.debug_struct("EventBus")
            .field("handlers", &registry.len())
            .field("middleware", &registry.middleware_len())
            .field("closed", &registry.is_closed())
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
