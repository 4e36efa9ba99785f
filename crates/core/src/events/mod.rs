// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process publish/subscribe for domain events
//!
//! This module provides:
//! - `EventBus` - Route events to handlers by name pattern, in priority order
//! - `Event` / `BaseEvent` - The event contract and the embeddable metadata base
//! - `EventPattern` - Dot-segmented patterns with single-segment `*` wildcards
//! - `middleware` - Handler transforms (logging, timing, retry)

mod bus;
mod event;
mod handler;
pub mod middleware;
mod pattern;
mod registry;
mod subscription;

pub use bus::EventBus;
pub use event::{wrap, wrap_with, AsAny, BaseEvent, Event, EventMetadata, EventRef, WrappedEvent};
pub use handler::{Handler, HandlerFn, HandlerRef};
pub use middleware::{build_chain, middleware_fn, Middleware};
pub use pattern::{matches, EventPattern};
pub use subscription::{SubscribeOptions, Subscription};
