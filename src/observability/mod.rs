// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability: structured log messages and subscriber setup.
//!
//! Diagnostic output goes through `tracing`. Message types in [`messages`]
//! keep wording and field names in one place; each implements `Display` and
//! [`messages::StructuredLog`].
//!
//! Hosts that do not install their own subscriber can call
//! [`init_tracing`] once at startup.

use tracing_subscriber::EnvFilter;

pub mod messages;

/// Install a formatted subscriber filtered by `RUST_LOG`.
///
/// `default_filter` applies when `RUST_LOG` is unset or unparsable, for
/// example `"gibbs_bridge=info"`. Returns `false` when a global subscriber
/// was already installed, which leaves the existing one in place.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        let _first = init_tracing("gibbs_bridge=debug");
        assert!(!init_tracing("gibbs_bridge=debug"));
    }
}
