// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced by engine session operations.

use crate::engine::SessionState;
use crate::errors::InputError;
use thiserror::Error;

/// Every fatal condition an engine session operation can raise.
///
/// Engine-reported failures carry the diagnostic text the engine wrote to
/// its error buffer, verbatim. A failure reported without any text becomes
/// [`SessionError::Internal`].
#[derive(Error, Debug)]
pub enum SessionError {
    /// Host data or an argument was rejected before reaching the engine.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The operation was issued out of protocol order.
    #[error("{operation} requires a session that is {required}, but it is {actual}")]
    InvalidState {
        operation: &'static str,
        required: SessionState,
        actual: SessionState,
    },

    /// The session's engine has already been released.
    #[error("{operation} called on a released session; the model must be recompiled")]
    Released { operation: &'static str },

    /// The model could not be opened or parsed.
    #[error("Model error: {0}")]
    Model(String),

    /// Model and data are inconsistent.
    #[error("Compilation error: {0}")]
    Compile(String),

    /// Parameter values or RNG settings were rejected.
    #[error("Parameter error: {0}")]
    Parameter(String),

    /// Initialization failed, typically for missing initial values.
    #[error("Initialization error: {0}")]
    Init(String),

    /// A monitor request was rejected.
    #[error("Monitor error for {target}: {message}")]
    Monitor { target: String, message: String },

    /// An update or dump failed mid-operation.
    #[error("Engine failure during {operation}: {message}")]
    EngineFailure {
        operation: &'static str,
        message: String,
    },

    /// The engine reported failure but left no diagnostic text.
    #[error("Internal error in engine library during {operation}")]
    Internal { operation: &'static str },

    /// The host asked to stop between update chunks.
    #[error("Update cancelled after {completed} of {requested} iterations")]
    Cancelled { completed: u32, requested: u32 },

    /// Reading a model file or writing progress output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// True for failures raised at the boundary before the engine was called.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SessionError::InvalidInput(_))
    }
}

/// Result type alias for engine session operations.
pub type SessionResult<T> = Result<T, SessionError>;
