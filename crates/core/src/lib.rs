//! evbus-core: in-process event bus
//!
//! This crate provides:
//! - Pattern-routed publish/subscribe with priorities and async handlers
//! - Middleware for logging, timing and retry around every handler
//! - Event metadata for correlation and causation tracking
//! - Cancellation contexts, configuration and test helpers

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod id;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{BusConfig, ConfigError, LogConfig, MiddlewareConfig};
pub use context::Context;
pub use error::{BoxError, EventError, HandlerResult};
pub use events::{
    BaseEvent, Event, EventBus, EventMetadata, EventPattern, EventRef, Handler, HandlerFn,
    HandlerRef, Middleware, SubscribeOptions, Subscription,
};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
