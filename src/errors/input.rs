// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for host data and argument validation.
//!
//! Everything in this module is raised at the binding boundary, before the
//! engine sees the request, so none of these failures leave partial state
//! behind in an engine session.

use crate::errors::ArrayError;
use thiserror::Error;

/// Malformed host data or out-of-range arguments.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// The host collection has no names, or not one per entry.
    #[error("data must be a named list: {names} names for {entries} entries")]
    NotNamed { names: usize, entries: usize },

    /// An entry could not be coerced to numeric.
    #[error("entry '{name}' is not numeric (found {found})")]
    NotNumeric { name: String, found: &'static str },

    /// An entry violates a typed array or table invariant.
    #[error("entry '{name}': {source}")]
    Array {
        name: String,
        #[source]
        source: ArrayError,
    },

    /// A JSON document could not be mapped onto a host list.
    #[error("invalid host JSON: {0}")]
    Json(String),

    /// Chain counts start at one.
    #[error("chain count must be at least 1, got {0}")]
    ChainCount(u32),

    /// Chain indices are 1-based and bounded by the compiled chain count.
    #[error("chain index {chain} is outside 1..={chains}")]
    ChainIndex { chain: u32, chains: u32 },

    /// Monitors record every `thin`-th iteration, so zero is meaningless.
    #[error("thinning interval must be at least 1")]
    Thinning,

    /// A named argument was empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),
}
