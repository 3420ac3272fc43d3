// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Protocol stage of an engine session.
///
/// Stages are ordered; an operation that needs a stage accepts any later
/// stage too, except [`SessionState::Released`], which accepts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionState {
    Created,
    ModelLoaded,
    Compiled,
    ParametersSet,
    Initialized,
    Released,
}

impl SessionState {
    /// True if an operation needing `required` may run in this state.
    pub fn satisfies(self, required: SessionState) -> bool {
        self != SessionState::Released && self >= required
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Created => "created",
            SessionState::ModelLoaded => "model loaded",
            SessionState::Compiled => "compiled",
            SessionState::ParametersSet => "parameters set",
            SessionState::Initialized => "initialized",
            SessionState::Released => "released",
        };
        f.write_str(label)
    }
}
