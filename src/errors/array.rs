// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while constructing typed arrays and data tables.

use thiserror::Error;

/// Violations of the typed array and data table invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArrayError {
    /// The product of the shape does not match the number of values.
    #[error("shape {shape:?} holds {expected} elements but {actual} values were supplied")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// A dimension of size zero was supplied.
    #[error("dimension {axis} of shape {shape:?} has size zero")]
    ZeroDimension { shape: Vec<usize>, axis: usize },

    /// Dimension names must label every dimension.
    #[error("{names} dimension names supplied for {dims} dimensions")]
    DimNamesMismatch { names: usize, dims: usize },

    /// Table entries need a non-empty name.
    #[error("variable names must be non-empty")]
    EmptyName,

    /// A name may appear only once in a table.
    #[error("duplicate variable name '{0}'")]
    DuplicateName(String),
}
