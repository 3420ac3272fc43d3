// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for engine session lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Session creation and release
//! * Protocol state transitions
//! * Operation completion and failure
//! * Text the engine wrote to its message buffers

use crate::engine::SessionState;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A session was created around a fresh engine instance.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use gibbs_bridge::observability::messages::session::SessionCreated;
///
/// let msg = SessionCreated { session_id: 7 };
/// assert_eq!(msg.to_string(), "Engine session 7 created");
/// ```
pub struct SessionCreated {
    pub session_id: u64,
}

impl Display for SessionCreated {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Engine session {} created", self.session_id)
    }
}

impl StructuredLog for SessionCreated {
    fn log(&self) {
        tracing::info!(session_id = self.session_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("session", span_name = name, session_id = self.session_id)
    }
}

/// The session moved to a new protocol state.
///
/// # Log Level
/// `info!` - Important operational event
pub struct StateChanged {
    pub session_id: u64,
    pub from: SessionState,
    pub to: SessionState,
}

impl Display for StateChanged {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine session {} moved from {} to {}",
            self.session_id, self.from, self.to
        )
    }
}

impl StructuredLog for StateChanged {
    fn log(&self) {
        tracing::info!(
            session_id = self.session_id,
            from = %self.from,
            to = %self.to,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "state_changed",
            span_name = name,
            session_id = self.session_id,
            from = %self.from,
            to = %self.to,
        )
    }
}

/// An operation is about to be forwarded to the engine.
///
/// # Log Level
/// `debug!` - Per-call detail
pub struct OperationStarted<'a> {
    pub session_id: u64,
    pub operation: &'a str,
}

impl Display for OperationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Session {}: {} started", self.session_id, self.operation)
    }
}

impl StructuredLog for OperationStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            session_id = self.session_id,
            operation = self.operation,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "operation",
            span_name = name,
            session_id = self.session_id,
            operation = self.operation,
        )
    }
}

/// An operation finished without a fatal condition.
///
/// # Log Level
/// `debug!` - Per-call detail
pub struct OperationCompleted<'a> {
    pub session_id: u64,
    pub operation: &'a str,
    pub duration: Duration,
}

impl Display for OperationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Session {}: {} completed in {:?}",
            self.session_id, self.operation, self.duration
        )
    }
}

impl StructuredLog for OperationCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            session_id = self.session_id,
            operation = self.operation,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "operation_completed",
            span_name = name,
            session_id = self.session_id,
            operation = self.operation,
            duration = ?self.duration,
        )
    }
}

/// An operation raised a fatal condition.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use gibbs_bridge::observability::messages::session::OperationFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "syntax error on line 3");
/// let msg = OperationFailed {
///     session_id: 2,
///     operation: "check_model",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct OperationFailed<'a> {
    pub session_id: u64,
    pub operation: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for OperationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Session {}: {} failed: {}",
            self.session_id, self.operation, self.error
        )
    }
}

impl StructuredLog for OperationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            session_id = self.session_id,
            operation = self.operation,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "operation_failed",
            span_name = name,
            session_id = self.session_id,
            operation = self.operation,
            error = %self.error,
        )
    }
}

/// Informational text the engine wrote during an operation.
///
/// # Log Level
/// `info!` - Surfaced to the caller as a notice
pub struct EngineNotice<'a> {
    pub session_id: u64,
    pub operation: &'a str,
    pub text: &'a str,
}

impl Display for EngineNotice<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.text.trim_end())
    }
}

impl StructuredLog for EngineNotice<'_> {
    fn log(&self) {
        tracing::info!(
            session_id = self.session_id,
            operation = self.operation,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "engine_notice",
            span_name = name,
            session_id = self.session_id,
            operation = self.operation,
        )
    }
}

/// Error text the engine wrote during an operation that still succeeded.
///
/// # Log Level
/// `warn!` - Non-fatal, surfaced to the caller as a warning
pub struct EngineWarning<'a> {
    pub session_id: u64,
    pub operation: &'a str,
    pub text: &'a str,
}

impl Display for EngineWarning<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.text.trim_end())
    }
}

impl StructuredLog for EngineWarning<'_> {
    fn log(&self) {
        tracing::warn!(
            session_id = self.session_id,
            operation = self.operation,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "engine_warning",
            span_name = name,
            session_id = self.session_id,
            operation = self.operation,
        )
    }
}

/// The engine instance behind a session was released.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SessionReleased {
    pub session_id: u64,
    pub iterations: u32,
}

impl Display for SessionReleased {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine session {} released after {} iterations",
            self.session_id, self.iterations
        )
    }
}

impl StructuredLog for SessionReleased {
    fn log(&self) {
        tracing::info!(
            session_id = self.session_id,
            iterations = self.iterations,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "session_released",
            span_name = name,
            session_id = self.session_id,
        )
    }
}
