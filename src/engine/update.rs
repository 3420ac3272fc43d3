// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Chunked, adaptation-aware update driver.
//!
//! An update of `N` iterations is cut into chunks so the driver can report
//! progress, honour cancellation and end the adaptive phase between engine
//! calls. When the chains are adapting, `N` is first split into two sub-runs
//! of `⌈N/2⌉` and `⌊N/2⌋` iterations; adaptation is switched off at the end
//! of the first, leaving the second to settle with fixed samplers.

use std::time::Instant;

use crate::engine::MessageSink;
use crate::errors::{SessionError, SessionResult};
use crate::observability::messages::update::{
    AdaptationIncomplete, AdaptiveSplit, ChunkCompleted, UpdateCancelled, UpdateCompleted,
    UpdateStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{Engine, InterruptCheck, Phase, ProgressPlan, ProgressReporter};

/// Outcome of a completed update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Iterations actually performed.
    pub iterations: u32,
    /// Engine update calls issued.
    pub chunks: u32,
    /// False when the engine left adaptive mode without converging.
    pub adaptation_complete: bool,
}

impl Default for UpdateSummary {
    fn default() -> Self {
        Self {
            iterations: 0,
            chunks: 0,
            adaptation_complete: true,
        }
    }
}

/// Sizes of the two sub-runs of an adapting update, larger first.
pub fn split_adaptive(iterations: u32) -> (u32, u32) {
    let second = iterations / 2;
    (iterations - second, second)
}

/// Chunk size and row layout for a plain run of `iterations`.
///
/// Without a fixed `refresh`, chunks are sized so a run fills one row of
/// `width` ticks. A row never holds more ticks than the run has chunks.
pub fn progress_plan(iterations: u32, width: u32, refresh: Option<u32>) -> ProgressPlan {
    let width = width.max(1);
    let refresh = refresh.unwrap_or(iterations / width).max(1);
    let chunks = iterations.div_ceil(refresh);
    ProgressPlan {
        iterations,
        refresh,
        row_len: width.min(chunks).max(1),
    }
}

/// Drives one `update` request against an engine.
pub struct UpdateDriver<'a> {
    engine: &'a mut dyn Engine,
    sink: &'a mut MessageSink,
    progress: &'a mut dyn ProgressReporter,
    interrupt: &'a dyn InterruptCheck,
    width: u32,
    refresh: Option<u32>,
}

impl<'a> UpdateDriver<'a> {
    pub fn new(
        engine: &'a mut dyn Engine,
        sink: &'a mut MessageSink,
        progress: &'a mut dyn ProgressReporter,
        interrupt: &'a dyn InterruptCheck,
    ) -> Self {
        Self {
            engine,
            sink,
            progress,
            interrupt,
            width: crate::config::consts::DEFAULT_PROGRESS_WIDTH,
            refresh: None,
        }
    }

    /// Ticks per progress row.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Fixed chunk size instead of one derived from the row width.
    pub fn with_refresh(mut self, refresh: Option<u32>) -> Self {
        self.refresh = refresh;
        self
    }

    /// Run `iterations` iterations. Zero is a successful no-op.
    ///
    /// Stops at the first failed chunk with [`SessionError::EngineFailure`]
    /// (or [`SessionError::Internal`] when the engine left no text), and at
    /// the first chunk boundary after an interrupt with
    /// [`SessionError::Cancelled`]. Neither path switches adaptation off.
    pub fn run(mut self, iterations: u32) -> SessionResult<UpdateSummary> {
        let started = Instant::now();
        let mut summary = UpdateSummary::default();

        if iterations == 0 {
            return Ok(summary);
        }

        if self.engine.is_adapting() {
            let (first, second) = split_adaptive(iterations);
            AdaptiveSplit { first, second }.log();
            for part in [first, second] {
                if part > 0 {
                    self.run_plain(part, iterations, &mut summary)?;
                }
            }
        } else {
            self.run_plain(iterations, iterations, &mut summary)?;
        }

        UpdateCompleted {
            iterations: summary.iterations,
            duration: started.elapsed(),
        }
        .log();

        Ok(summary)
    }

    fn run_plain(
        &mut self,
        iterations: u32,
        requested: u32,
        summary: &mut UpdateSummary,
    ) -> SessionResult<()> {
        let adapting = self.engine.is_adapting();
        let phase = if adapting {
            Phase::Adapting
        } else {
            Phase::Sampling
        };
        let plan = progress_plan(iterations, self.width, self.refresh);

        let start_msg = UpdateStarted {
            iterations,
            refresh: plan.refresh,
            chunks: iterations.div_ceil(plan.refresh),
            adapting,
        };
        let span = start_msg.span("update_chunks");
        let _guard = span.enter();
        start_msg.log();

        self.progress.begin(&plan)?;

        let mut remaining = iterations;
        let mut column = 0;
        let mut chunk = 0;

        while remaining > 0 {
            let size = remaining.min(plan.refresh);

            if !self.engine.update(size, self.sink) {
                self.progress.abort()?;
                return Err(match self.sink.take_error() {
                    Some(message) => SessionError::EngineFailure {
                        operation: "update",
                        message,
                    },
                    None => SessionError::Internal {
                        operation: "update",
                    },
                });
            }

            remaining -= size;
            chunk += 1;
            column += 1;
            summary.iterations += size;
            summary.chunks += 1;

            ChunkCompleted {
                chunk,
                size,
                completed: iterations - remaining,
                total: iterations,
            }
            .log();

            self.progress.tick(phase)?;
            if column == plan.row_len || remaining == 0 {
                let percent = 100 - (u64::from(remaining) * 100 / u64::from(iterations)) as u32;
                self.progress.row_complete(percent)?;
                column = 0;
            }

            if self.interrupt.is_interrupted() {
                if column != 0 {
                    self.progress.abort()?;
                }
                UpdateCancelled {
                    completed: summary.iterations,
                    requested,
                }
                .log();
                return Err(SessionError::Cancelled {
                    completed: summary.iterations,
                    requested,
                });
            }
        }

        if adapting && !self.engine.adapt_off(self.sink) {
            summary.adaptation_complete = false;
            AdaptationIncomplete { iterations }.log();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_puts_larger_half_first() {
        assert_eq!(split_adaptive(100), (50, 50));
        assert_eq!(split_adaptive(101), (51, 50));
        assert_eq!(split_adaptive(1), (1, 0));
    }

    #[test]
    fn test_default_plan_targets_one_row() {
        let plan = progress_plan(1000, 40, None);
        assert_eq!(plan.refresh, 25);
        assert_eq!(plan.row_len, 40);
        assert_eq!(plan.first_row_iterations(), 1000);
    }

    #[test]
    fn test_short_runs_tick_every_iteration() {
        let plan = progress_plan(10, 40, None);
        assert_eq!(plan.refresh, 1);
        assert_eq!(plan.row_len, 10);
    }

    #[test]
    fn test_fixed_refresh_shortens_row() {
        let plan = progress_plan(100, 40, Some(3));
        assert_eq!(plan.refresh, 3);
        assert_eq!(plan.row_len, 34);
        assert_eq!(plan.first_row_iterations(), 100);
    }

    #[test]
    fn test_fixed_refresh_wraps_rows() {
        let plan = progress_plan(100, 4, Some(5));
        assert_eq!(plan.row_len, 4);
        assert_eq!(plan.first_row_iterations(), 20);
    }
}
