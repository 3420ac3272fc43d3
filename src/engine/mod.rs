// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod progress;
pub mod runner;
pub mod session;
pub mod sink;
pub mod state;
pub mod update;

pub use progress::{SilentProgress, TextProgress};
pub use runner::{run_model, RunOutput};
pub use session::{ChainState, Session};
pub use sink::{Drained, MessageSink, Notice, NoticeKind};
pub use state::SessionState;
pub use update::{split_adaptive, UpdateDriver, UpdateSummary};
