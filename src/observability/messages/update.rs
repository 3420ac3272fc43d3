// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the update driver.
//!
//! This module contains message types for logging events related to:
//! * Update runs and their chunk plan
//! * The mid-run adaptation cutoff
//! * Cancellation between chunks

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// An update run is starting.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use gibbs_bridge::observability::messages::update::UpdateStarted;
///
/// let msg = UpdateStarted {
///     iterations: 1000,
///     refresh: 25,
///     chunks: 40,
///     adapting: true,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct UpdateStarted {
    pub iterations: u32,
    pub refresh: u32,
    pub chunks: u32,
    pub adapting: bool,
}

impl Display for UpdateStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Updating {} iterations in {} chunks of up to {} ({})",
            self.iterations,
            self.chunks,
            self.refresh,
            if self.adapting { "adapting" } else { "sampling" }
        )
    }
}

impl StructuredLog for UpdateStarted {
    fn log(&self) {
        tracing::info!(
            iterations = self.iterations,
            refresh = self.refresh,
            chunks = self.chunks,
            adapting = self.adapting,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "update",
            span_name = name,
            iterations = self.iterations,
            refresh = self.refresh,
            adapting = self.adapting,
        )
    }
}

/// An adapting update was split so adaptation ends at the midpoint.
///
/// # Log Level
/// `info!` - Important operational event
pub struct AdaptiveSplit {
    pub first: u32,
    pub second: u32,
}

impl Display for AdaptiveSplit {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Chains are adapting: running {} adaptive iterations, then {} more",
            self.first, self.second
        )
    }
}

impl StructuredLog for AdaptiveSplit {
    fn log(&self) {
        tracing::info!(first = self.first, second = self.second, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "adaptive_split",
            span_name = name,
            first = self.first,
            second = self.second,
        )
    }
}

/// One chunk of engine iterations finished.
///
/// # Log Level
/// `debug!` - Per-chunk detail
pub struct ChunkCompleted {
    pub chunk: u32,
    pub size: u32,
    pub completed: u32,
    pub total: u32,
}

impl Display for ChunkCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Chunk {} ({} iterations) done: {}/{}",
            self.chunk, self.size, self.completed, self.total
        )
    }
}

impl StructuredLog for ChunkCompleted {
    fn log(&self) {
        tracing::debug!(
            chunk = self.chunk,
            size = self.size,
            completed = self.completed,
            total = self.total,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("chunk", span_name = name, chunk = self.chunk, size = self.size)
    }
}

/// The engine could not finish tuning its samplers.
///
/// # Log Level
/// `warn!` - Samples remain usable; the caller decides what to do
pub struct AdaptationIncomplete {
    pub iterations: u32,
}

impl Display for AdaptationIncomplete {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Adaptation incomplete after {} iterations",
            self.iterations
        )
    }
}

impl StructuredLog for AdaptationIncomplete {
    fn log(&self) {
        tracing::warn!(iterations = self.iterations, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "adaptation_incomplete",
            span_name = name,
            iterations = self.iterations,
        )
    }
}

/// The host asked to stop between chunks.
///
/// # Log Level
/// `warn!` - The run stopped early
pub struct UpdateCancelled {
    pub completed: u32,
    pub requested: u32,
}

impl Display for UpdateCancelled {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Update cancelled after {} of {} iterations",
            self.completed, self.requested
        )
    }
}

impl StructuredLog for UpdateCancelled {
    fn log(&self) {
        tracing::warn!(
            completed = self.completed,
            requested = self.requested,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "update_cancelled",
            span_name = name,
            completed = self.completed,
            requested = self.requested,
        )
    }
}

/// All requested iterations ran.
///
/// # Log Level
/// `info!` - Important operational event
pub struct UpdateCompleted {
    pub iterations: u32,
    pub duration: Duration,
}

impl Display for UpdateCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Update of {} iterations completed in {:?}",
            self.iterations, self.duration
        )
    }
}

impl StructuredLog for UpdateCompleted {
    fn log(&self) {
        tracing::info!(
            iterations = self.iterations,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "update_completed",
            span_name = name,
            iterations = self.iterations,
            duration = ?self.duration,
        )
    }
}
