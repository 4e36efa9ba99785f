// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `evbus demo <scenario>` - Run a reference dispatch scenario
//!
//! Each scenario wires a few handlers onto a fresh bus built from the
//! effective configuration, publishes domain events and returns what the
//! handlers observed, one line per observation. Ids come from sequential
//! generators, so apart from the durations the `middleware` scenario
//! measures, the transcript is the same on every run.

use anyhow::{bail, Context as _};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use evbus_core::events::middleware_fn;
use evbus_core::{
    BaseEvent, BusConfig, Context, Event, EventBus, EventMetadata, EventRef, Handler, HandlerFn,
    HandlerRef, SequentialIdGen, SubscribeOptions, SystemClock,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::Notify;

const ASYNC_WAIT: Duration = Duration::from_secs(5);

#[derive(Args)]
pub struct DemoArgs {
    /// Scenario to run
    #[arg(value_enum)]
    pub scenario: Scenario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Two services react to one signup
    Registration,
    /// `order.*` sees every status, `order.completed` only one
    Wildcard,
    /// Inventory checks run before shipment
    Priority,
    /// An async handler finishes after publish returns
    Async,
    /// Middleware wraps every handler in registration order
    Middleware,
    /// A follow-up event keeps the correlation id
    Correlation,
    /// A removed handler stops receiving events
    Unsubscribe,
    /// A closed bus rejects publishes
    Closed,
}

// =============================================================================
// Domain events
// =============================================================================

struct UserCreated {
    base: BaseEvent,
    user_id: u32,
    username: String,
    email: String,
}

impl Event for UserCreated {
    fn event_name(&self) -> String {
        "user.created".to_string()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.base.occurred_at()
    }

    fn metadata(&self) -> Option<&EventMetadata> {
        Some(self.base.metadata())
    }
}

struct OrderEvent {
    base: BaseEvent,
    order_id: String,
    status: String,
}

impl Event for OrderEvent {
    fn event_name(&self) -> String {
        format!("order.{}", self.status)
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.base.occurred_at()
    }

    fn metadata(&self) -> Option<&EventMetadata> {
        Some(self.base.metadata())
    }
}

struct PaymentReceived {
    base: BaseEvent,
    order_id: String,
}

impl Event for PaymentReceived {
    fn event_name(&self) -> String {
        "payment.received".to_string()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.base.occurred_at()
    }

    fn metadata(&self) -> Option<&EventMetadata> {
        Some(self.base.metadata())
    }
}

// =============================================================================
// Harness
// =============================================================================

/// Lines observed by handlers, in the order they were said
#[derive(Clone, Default)]
struct Transcript(Arc<Mutex<Vec<String>>>);

impl Transcript {
    fn say(&self, line: impl Into<String>) {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.into());
    }

    fn into_lines(self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

struct Demo {
    bus: EventBus,
    ids: SequentialIdGen,
    out: Transcript,
}

impl Demo {
    fn new(config: &BusConfig) -> Self {
        Self {
            bus: EventBus::from_config(config).with_id_gen(SequentialIdGen::new("sub")),
            ids: SequentialIdGen::new("evt"),
            out: Transcript::default(),
        }
    }

    fn base(&self) -> BaseEvent {
        BaseEvent::new_with(&SystemClock, &self.ids)
    }

    fn order(&self, order_id: &str, status: &str) -> OrderEvent {
        OrderEvent {
            base: self.base(),
            order_id: order_id.to_string(),
            status: status.to_string(),
        }
    }
}

/// Borrow the producer's event or fail the handler
fn payload<T: Event>(event: &EventRef) -> Result<&T, evbus_core::EventError> {
    event
        .downcast_ref::<T>()
        .ok_or_else(|| evbus_core::EventError::msg(format!("unexpected payload for {}", event.event_name())))
}

pub async fn run(scenario: Scenario, config: &BusConfig) -> anyhow::Result<Vec<String>> {
    let demo = Demo::new(config);
    match scenario {
        Scenario::Registration => registration(&demo).await?,
        Scenario::Wildcard => wildcard(&demo).await?,
        Scenario::Priority => priority(&demo).await?,
        Scenario::Async => async_handlers(&demo).await?,
        Scenario::Middleware => middleware(&demo).await?,
        Scenario::Correlation => correlation(&demo).await?,
        Scenario::Unsubscribe => unsubscribe(&demo).await?,
        Scenario::Closed => closed(&demo).await?,
    }
    Ok(demo.out.into_lines())
}

// =============================================================================
// Scenarios
// =============================================================================

async fn registration(demo: &Demo) -> anyhow::Result<()> {
    let out = demo.out.clone();
    demo.bus
        .subscribe("user.created", move |_ctx: Context, event: EventRef| {
            let result = payload::<UserCreated>(&event).map(|e| {
                out.say(format!("welcome email sent to {} ({})", e.username, e.email));
            });
            async move { result }
        });

    let out = demo.out.clone();
    demo.bus
        .subscribe("user.created", move |_ctx: Context, event: EventRef| {
            let result = payload::<UserCreated>(&event).map(|e| {
                out.say(format!("initialized 100 points for user {}", e.user_id));
            });
            async move { result }
        });

    let mut base = demo.base();
    base.set_source("user-service");
    let event = UserCreated {
        base,
        user_id: 1,
        username: "john".to_string(),
        email: "john@example.com".to_string(),
    };
    demo.bus.publish(&Context::background(), event).await?;
    Ok(())
}

async fn wildcard(demo: &Demo) -> anyhow::Result<()> {
    let out = demo.out.clone();
    demo.bus
        .subscribe("order.*", move |_ctx: Context, event: EventRef| {
            let result = payload::<OrderEvent>(&event).map(|e| {
                out.say(format!("order {} status changed to: {}", e.order_id, e.status));
            });
            async move { result }
        });

    let out = demo.out.clone();
    demo.bus
        .subscribe("order.completed", move |_ctx: Context, event: EventRef| {
            let result = payload::<OrderEvent>(&event).map(|e| {
                out.say(format!("order {} completed, sending notification", e.order_id));
            });
            async move { result }
        });

    let ctx = Context::background();
    for status in ["created", "paid", "completed"] {
        demo.bus.publish(&ctx, demo.order("ORD-001", status)).await?;
    }
    Ok(())
}

async fn priority(demo: &Demo) -> anyhow::Result<()> {
    let steps = [
        ("3. processing shipment", 10),
        ("1. checking inventory", 100),
        ("2. deducting inventory", 50),
    ];
    for (step, priority) in steps {
        let out = demo.out.clone();
        demo.bus.subscribe_with(
            "order.paid",
            move |_ctx: Context, _event: EventRef| {
                out.say(step);
                async { Ok(()) }
            },
            SubscribeOptions::new().with_priority(priority),
        );
    }

    demo.bus
        .publish(&Context::background(), demo.order("ORD-002", "paid"))
        .await?;
    Ok(())
}

async fn async_handlers(demo: &Demo) -> anyhow::Result<()> {
    let done = Arc::new(Notify::new());

    let out = demo.out.clone();
    let sent = Arc::clone(&done);
    demo.bus.subscribe_with(
        "user.created",
        move |_ctx: Context, _event: EventRef| {
            let out = out.clone();
            let sent = Arc::clone(&sent);
            async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                out.say("sms sent (async)");
                sent.notify_one();
                Ok(())
            }
        },
        SubscribeOptions::new().with_async(),
    );

    let out = demo.out.clone();
    demo.bus
        .subscribe("user.created", move |_ctx: Context, _event: EventRef| {
            out.say("stats updated (sync)");
            async { Ok(()) }
        });

    let event = UserCreated {
        base: demo.base(),
        user_id: 2,
        username: "jane".to_string(),
        email: "jane@example.com".to_string(),
    };
    demo.bus.publish(&Context::background(), event).await?;
    demo.out.say("publish returned");

    tokio::time::timeout(ASYNC_WAIT, done.notified())
        .await
        .context("async handler did not finish")?;
    Ok(())
}

/// Middleware that reports before and after the wrapped handler
fn reporting(out: Transcript, timed: bool) -> evbus_core::Middleware {
    middleware_fn(move |next: HandlerRef| {
        let out = out.clone();
        HandlerFn::arc(move |ctx: Context, event: EventRef| {
            let next = Arc::clone(&next);
            let out = out.clone();
            async move {
                let name = event.event_name();
                if !timed {
                    let id = event.metadata().map(|m| m.id.clone()).unwrap_or_default();
                    out.say(format!("[log] event: {name}, id: {id}"));
                    return next.handle(ctx, event).await;
                }
                let start = Instant::now();
                let result = next.handle(ctx, event).await;
                out.say(format!("[trace] {name} took {:?}", start.elapsed()));
                result
            }
        })
    })
}

async fn middleware(demo: &Demo) -> anyhow::Result<()> {
    demo.bus.use_all([
        reporting(demo.out.clone(), false),
        reporting(demo.out.clone(), true),
    ]);

    let out = demo.out.clone();
    demo.bus
        .subscribe("payment.received", move |_ctx: Context, event: EventRef| {
            let result = payload::<PaymentReceived>(&event).map(|e| {
                out.say(format!("processing payment for {}", e.order_id));
            });
            async move { result }
        });

    let event = PaymentReceived {
        base: demo.base(),
        order_id: "ORD-003".to_string(),
    };
    demo.bus.publish(&Context::background(), event).await?;
    Ok(())
}

async fn correlation(demo: &Demo) -> anyhow::Result<()> {
    let out = demo.out.clone();
    let bus = demo.bus.clone();
    let ids = demo.ids.clone();
    demo.bus
        .subscribe("order.created", move |ctx: Context, event: EventRef| {
            let out = out.clone();
            let bus = bus.clone();
            let ids = ids.clone();
            async move {
                let order = payload::<OrderEvent>(&event)?;
                let parent = event.metadata().cloned().unwrap_or_default();
                out.say(format!(
                    "order {} created (correlation: {})",
                    order.order_id, parent.correlation_id
                ));

                let mut base = BaseEvent::new_with(&SystemClock, &ids);
                base.set_correlation_id(parent.correlation_id.clone());
                base.set_causation_id(parent.id.clone());
                base.set_source("payment-service");
                let payment = OrderEvent {
                    base,
                    order_id: order.order_id.clone(),
                    status: "payment_initiated".to_string(),
                };
                bus.publish(&ctx, payment).await
            }
        });

    let out = demo.out.clone();
    demo.bus
        .subscribe("order.payment_initiated", move |_ctx: Context, event: EventRef| {
            if let Some(meta) = event.metadata() {
                out.say(format!(
                    "payment initiated (correlation: {}, caused by: {}, source: {})",
                    meta.correlation_id, meta.causation_id, meta.source
                ));
            }
            async { Ok(()) }
        });

    let mut initial = demo.order("ORD-004", "created");
    initial.base.set_correlation_id("corr-12345678");
    initial.base.set_source("order-service");
    demo.bus.publish(&Context::background(), initial).await?;
    Ok(())
}

async fn unsubscribe(demo: &Demo) -> anyhow::Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));

    let out = demo.out.clone();
    let counter = Arc::clone(&calls);
    let subscription = demo
        .bus
        .subscribe("order.test", move |_ctx: Context, _event: EventRef| {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            out.say(format!("handler called {n} time(s)"));
            async { Ok(()) }
        });

    let ctx = Context::background();
    demo.bus.publish(&ctx, demo.order("1", "test")).await?;

    subscription.unsubscribe();
    demo.out.say("unsubscribed");

    demo.bus.publish(&ctx, demo.order("2", "test")).await?;
    demo.out
        .say(format!("final call count: {}", calls.load(Ordering::SeqCst)));
    Ok(())
}

async fn closed(demo: &Demo) -> anyhow::Result<()> {
    let out = demo.out.clone();
    demo.bus
        .subscribe("order.*", move |_ctx: Context, event: EventRef| {
            out.say(format!("received {}", event.event_name()));
            async { Ok(()) }
        });

    let ctx = Context::background();
    demo.bus.publish(&ctx, demo.order("ORD-005", "created")).await?;

    demo.bus.close();
    demo.out.say("bus closed");

    match demo.bus.publish(&ctx, demo.order("ORD-005", "paid")).await {
        Ok(()) => bail!("closed bus accepted an event"),
        Err(e) => demo.out.say(format!("publish rejected: {e}")),
    }
    Ok(())
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;
