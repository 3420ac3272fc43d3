// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io;

/// Sampler phase a progress tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Adapting,
    Sampling,
}

impl Phase {
    pub fn tick(self) -> char {
        match self {
            Phase::Adapting => '+',
            Phase::Sampling => '*',
        }
    }
}

/// Layout of one plain update run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressPlan {
    pub iterations: u32,
    pub refresh: u32,
    /// Ticks per row.
    pub row_len: u32,
}

impl ProgressPlan {
    /// Iterations covered by the first row.
    pub fn first_row_iterations(&self) -> u32 {
        self.row_len.saturating_mul(self.refresh).min(self.iterations)
    }
}

/// Receives update progress, one tick per completed chunk.
pub trait ProgressReporter {
    fn begin(&mut self, plan: &ProgressPlan) -> io::Result<()>;

    fn tick(&mut self, phase: Phase) -> io::Result<()>;

    /// A row filled up or the final chunk finished.
    fn row_complete(&mut self, percent: u32) -> io::Result<()>;

    /// The run stopped early, by failure or cancellation.
    fn abort(&mut self) -> io::Result<()>;
}
