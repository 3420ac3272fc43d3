// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Engine backends.
//!
//! Production engines live outside this crate and plug in through the
//! [`Engine`](crate::traits::Engine) trait.
//!
//! ## Stub Backend (Test-Only)
//! - **ScriptedEngine**: in-memory engine with per-operation scripted
//!   failures, informational text and warnings, plus a shared call log
//! - **Note**: NOT available in production builds

#[cfg(test)]
pub mod stub;
