// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod engine;
pub mod interrupt;
pub mod progress;

pub use engine::{DumpKind, Engine, SamplerInfo, StateDump};
pub use interrupt::{InterruptCheck, NeverInterrupt};
pub use progress::{Phase, ProgressPlan, ProgressReporter};
