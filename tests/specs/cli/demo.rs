//! Reference scenario specs
//!
//! Verify the observable output of each `evbus demo` scenario.

use crate::prelude::*;

fn demo(scenario: &str) -> RunAssert {
    Project::empty().evbus().args(&["demo", scenario]).passes()
}

#[test]
fn registration() {
    demo("registration").stdout_eq(
        "welcome email sent to john (john@example.com)\n\
         initialized 100 points for user 1\n",
    );
}

#[test]
fn wildcard() {
    demo("wildcard").stdout_eq(
        "order ORD-001 status changed to: created\n\
         order ORD-001 status changed to: paid\n\
         order ORD-001 status changed to: completed\n\
         order ORD-001 completed, sending notification\n",
    );
}

#[test]
fn priority() {
    demo("priority").stdout_eq(
        "1. checking inventory\n\
         2. deducting inventory\n\
         3. processing shipment\n",
    );
}

#[test]
fn async_handler_runs_after_publish_returns() {
    demo("async").stdout_eq(
        "stats updated (sync)\n\
         publish returned\n\
         sms sent (async)\n",
    );
}

#[test]
fn middleware_wraps_handler() {
    demo("middleware")
        .stdout_has("[log] event: payment.received, id: evt-1\nprocessing payment for ORD-003\n")
        .stdout_has("[trace] payment.received took ");
}

#[test]
fn correlation() {
    demo("correlation").stdout_eq(
        "order ORD-004 created (correlation: corr-12345678)\n\
         payment initiated (correlation: corr-12345678, caused by: evt-1, source: payment-service)\n",
    );
}

#[test]
fn unsubscribe() {
    demo("unsubscribe").stdout_eq(
        "handler called 1 time(s)\n\
         unsubscribed\n\
         final call count: 1\n",
    );
}

#[test]
fn closed_bus_rejects_publish() {
    demo("closed").stdout_eq(
        "received order.created\n\
         bus closed\n\
         publish rejected: event bus is closed\n",
    );
}

#[test]
fn verbose_logs_to_stderr() {
    let temp = Project::empty();
    temp.file("bus.toml", FULL_CONFIG);

    temp.evbus()
        .args(&["--config", "bus.toml", "--verbose", "demo", "priority"])
        .passes()
        .stdout_has("1. checking inventory")
        .stderr_has("running demo");
}

#[test]
fn rust_log_controls_filter() {
    Project::empty()
        .evbus()
        .env("RUST_LOG", "evbus_core=debug")
        .args(&["demo", "unsubscribe"])
        .passes()
        .stderr_has("unsubscribed");
}
