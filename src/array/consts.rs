// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Reserved value marking a missing element inside engine arrays.
///
/// It sits just above the most negative finite double so it can never
/// collide with the host's missing marker or with NaN.
pub const ENGINE_NA: f64 = -f64::MAX * (1.0 - 1.0e-15);

/// True when `value` is the engine's missing-value sentinel.
#[inline]
pub fn is_engine_na(value: f64) -> bool {
    value == ENGINE_NA
}
