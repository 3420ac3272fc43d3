// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::{self, Write};

use crate::traits::{Phase, ProgressPlan, ProgressReporter};

/// Text progress bar in the classic sampler style:
///
/// ```text
/// Updating 1000
/// ----------------------------------------| 1000
/// **************************************** 100%
/// ```
pub struct TextProgress<W: Write> {
    out: W,
}

impl<W: Write> TextProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextProgress<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ProgressReporter for TextProgress<W> {
    fn begin(&mut self, plan: &ProgressPlan) -> io::Result<()> {
        writeln!(self.out, "Updating {}", plan.iterations)?;
        let rule = "-".repeat(plan.row_len.saturating_sub(1) as usize);
        writeln!(self.out, "{}| {}", rule, plan.first_row_iterations())?;
        self.out.flush()
    }

    fn tick(&mut self, phase: Phase) -> io::Result<()> {
        write!(self.out, "{}", phase.tick())?;
        self.out.flush()
    }

    fn row_complete(&mut self, percent: u32) -> io::Result<()> {
        writeln!(self.out, " {}%", percent)?;
        self.out.flush()
    }

    fn abort(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn begin(&mut self, _plan: &ProgressPlan) -> io::Result<()> {
        Ok(())
    }

    fn tick(&mut self, _phase: Phase) -> io::Result<()> {
        Ok(())
    }

    fn row_complete(&mut self, _percent: u32) -> io::Result<()> {
        Ok(())
    }

    fn abort(&mut self) -> io::Result<()> {
        Ok(())
    }
}
