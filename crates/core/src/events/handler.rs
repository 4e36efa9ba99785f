// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event handlers

use super::event::EventRef;
use crate::context::Context;
use crate::error::HandlerResult;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Shared, type-erased handler
pub type HandlerRef = Arc<dyn Handler>;

/// Reacts to a dispatched event
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn handle(&self, ctx: Context, event: EventRef) -> HandlerResult;
}

/// Handler backed by an async closure
pub struct HandlerFn<F> {
    f: F,
}

impl<F, Fut> HandlerFn<F>
where
    F: Fn(Context, EventRef) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Wrap the closure and erase its type
    pub fn arc(f: F) -> HandlerRef {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Context, EventRef) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn handle(&self, ctx: Context, event: EventRef) -> HandlerResult {
        (self.f)(ctx, event).await
    }
}
