// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Middleware: handler-to-handler transforms for cross-cutting concerns
//!
//! Middleware registered first runs outermost: it observes the event first
//! and the result last.
//!
//! ```text
//! use(A); use(B)  ==>  A( B( handler ) )
//!
//! A before ─► B before ─► handler ─► B after ─► A after
//! ```

use super::event::EventRef;
use super::handler::{Handler, HandlerRef};
use crate::clock::Clock;
use crate::context::Context;
use crate::error::HandlerResult;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn, Instrument};

/// Wraps a handler with another handler of the same shape
pub type Middleware = Arc<dyn Fn(HandlerRef) -> HandlerRef + Send + Sync>;

/// Build a middleware from a closure
pub fn middleware_fn<F>(f: F) -> Middleware
where
    F: Fn(HandlerRef) -> HandlerRef + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Compose `middleware` around `handler` so execution follows registration order
pub fn build_chain(handler: HandlerRef, middleware: &[Middleware]) -> HandlerRef {
    middleware
        .iter()
        .rev()
        .fold(handler, |next, wrap| wrap(next))
}

/// Log every dispatch at debug level and handler failures at warn
pub fn logging() -> Middleware {
    middleware_fn(|next| Arc::new(Logged { next }) as HandlerRef)
}

/// Measure handler duration; warn when it exceeds `slow_threshold`
pub fn timing(clock: Arc<dyn Clock>, slow_threshold: Duration) -> Middleware {
    middleware_fn(move |next| {
        Arc::new(Timed {
            next,
            clock: Arc::clone(&clock),
            slow_threshold,
        }) as HandlerRef
    })
}

/// Re-run a failing handler up to `attempts` times in total
///
/// Context errors are returned immediately.
pub fn retry(attempts: u32) -> Middleware {
    let attempts = attempts.max(1);
    middleware_fn(move |next| Arc::new(Retried { next, attempts }) as HandlerRef)
}

struct Logged {
    next: HandlerRef,
}

#[async_trait]
impl Handler for Logged {
    async fn handle(&self, ctx: Context, event: EventRef) -> HandlerResult {
        let name = event.event_name();
        let id = event.metadata().map(|m| m.id.clone()).unwrap_or_default();
        let span = tracing::debug_span!("event", %name, %id);

        async move {
            debug!("dispatching");
            let result = self.next.handle(ctx, event).await;
            if let Err(e) = &result {
                warn!(error = %e, label = e.as_label(), "handler failed");
            }
            result
        }
        .instrument(span)
        .await
    }
}

struct Timed {
    next: HandlerRef,
    clock: Arc<dyn Clock>,
    slow_threshold: Duration,
}

#[async_trait]
impl Handler for Timed {
    async fn handle(&self, ctx: Context, event: EventRef) -> HandlerResult {
        let name = event.event_name();
        let start = self.clock.now();
        let result = self.next.handle(ctx, event).await;
        let elapsed = self.clock.now().saturating_duration_since(start);

        if elapsed > self.slow_threshold {
            warn!(%name, ?elapsed, threshold = ?self.slow_threshold, "slow event handler");
        } else {
            debug!(%name, ?elapsed, "event handled");
        }
        result
    }
}

struct Retried {
    next: HandlerRef,
    attempts: u32,
}

#[async_trait]
impl Handler for Retried {
    async fn handle(&self, ctx: Context, event: EventRef) -> HandlerResult {
        let mut attempt = 1;
        loop {
            match self.next.handle(ctx.clone(), Arc::clone(&event)).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_context_error() || attempt >= self.attempts => return Err(e),
                Err(e) => {
                    if let Some(ctx_err) = ctx.err() {
                        return Err(ctx_err);
                    }
                    debug!(
                        name = %event.event_name(),
                        attempt,
                        error = %e,
                        "retrying event handler"
                    );
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;
