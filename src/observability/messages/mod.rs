// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it with structured fields at its level.
//!
//! # Organization
//!
//! * `session` - engine session lifecycle and engine-reported text
//! * `update` - update driver phases, chunks and cancellation
//! * `codec` - host data conversion events
//!
//! # Usage Pattern
//!
//! ```rust
//! use gibbs_bridge::observability::messages::session::SessionCreated;
//! use gibbs_bridge::observability::messages::StructuredLog;
//!
//! SessionCreated { session_id: 1 }.log();
//! ```

use tracing::Span;

pub mod codec;
pub mod session;
pub mod update;

/// A message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
