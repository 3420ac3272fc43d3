// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Progress ticks per row, and the target tick count for one update run
pub const DEFAULT_PROGRESS_WIDTH: u32 = 40;
/// Monitor type used when a monitor entry names none
pub const DEFAULT_MONITOR_TYPE: &str = "trace";
/// Record every iteration unless told otherwise
pub const DEFAULT_THIN: u32 = 1;
/// Chains compiled when a run configuration does not say
pub const DEFAULT_CHAINS: u32 = 1;
