// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for event dispatch
//!
//! [`EventError`] is both what `publish` returns and what handlers return.
//! A sync handler's error reaches the publisher unmodified, so a handler that
//! re-publishes can forward the inner bus error with `?`.

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error carried by [`EventError::Handler`]
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type returned by handlers
pub type HandlerResult = Result<(), EventError>;

/// Errors produced by the event bus and its handlers
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EventError {
    /// The bus was closed; publishing is rejected permanently.
    #[error("event bus is closed")]
    Closed,

    /// The caller's context was cancelled before the next handler ran.
    #[error("context cancelled")]
    Cancelled,

    /// The caller's context deadline passed before the next handler ran.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// A handler failed.
    #[error("{message}")]
    Handler {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl EventError {
    /// Wrap an arbitrary error returned by handler code
    pub fn handler<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Handler {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Handler failure described only by a message
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
            source: None,
        }
    }

    /// Short stable label (snake_case) for logs
    pub fn as_label(&self) -> &'static str {
        match self {
            EventError::Closed => "bus_closed",
            EventError::Cancelled => "context_cancelled",
            EventError::DeadlineExceeded => "deadline_exceeded",
            EventError::Handler { .. } => "handler_failed",
        }
    }

    /// True for errors that come from the caller's context rather than a handler
    pub fn is_context_error(&self) -> bool {
        matches!(self, EventError::Cancelled | EventError::DeadlineExceeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("smtp unavailable")]
    struct SmtpDown;

    #[test]
    fn handler_error_keeps_source() {
        let err = EventError::handler(SmtpDown);
        assert_eq!(err.to_string(), "smtp unavailable");
        assert!(err.source().is_some());
        assert_eq!(err.as_label(), "handler_failed");
    }

    #[test]
    fn msg_error_has_no_source() {
        let err = EventError::msg("points service rejected user");
        assert_eq!(err.to_string(), "points service rejected user");
        assert!(err.source().is_none());
    }

    #[test]
    fn context_errors_are_classified() {
        assert!(EventError::Cancelled.is_context_error());
        assert!(EventError::DeadlineExceeded.is_context_error());
        assert!(!EventError::Closed.is_context_error());
        assert!(!EventError::msg("x").is_context_error());
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(EventError::Closed.as_label(), "bus_closed");
        assert_eq!(EventError::Cancelled.as_label(), "context_cancelled");
        assert_eq!(EventError::DeadlineExceeded.as_label(), "deadline_exceeded");
    }
}
