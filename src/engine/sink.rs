// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-session buffers for engine output.

use std::fmt;

/// Informational and error text written by the engine during one operation.
///
/// Each session owns one sink and lends it to the engine by `&mut` for every
/// call, so several sessions never share buffers.
#[derive(Debug, Default)]
pub struct MessageSink {
    info: String,
    error: String,
}

/// Text drained from a [`MessageSink`]. Empty buffers come back as `None`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Drained {
    pub info: Option<String>,
    pub error: Option<String>,
}

impl MessageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Informational buffer, for use with `write!`.
    pub fn info(&mut self) -> &mut String {
        &mut self.info
    }

    /// Error buffer, for use with `write!`.
    pub fn error(&mut self) -> &mut String {
        &mut self.error
    }

    pub fn push_info(&mut self, text: &str) {
        self.info.push_str(text);
    }

    pub fn push_error(&mut self, text: &str) {
        self.error.push_str(text);
    }

    pub fn has_info(&self) -> bool {
        !self.info.is_empty()
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    pub fn take_info(&mut self) -> Option<String> {
        non_empty(std::mem::take(&mut self.info))
    }

    pub fn take_error(&mut self) -> Option<String> {
        non_empty(std::mem::take(&mut self.error))
    }

    /// Empty both buffers.
    pub fn drain(&mut self) -> Drained {
        Drained {
            info: self.take_info(),
            error: self.take_error(),
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Severity of a surfaced notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// Non-fatal text surfaced to the caller after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub operation: &'static str,
    pub text: String,
}

impl Notice {
    pub fn info(operation: &'static str, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            operation,
            text: text.into(),
        }
    }

    pub fn warning(operation: &'static str, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            operation,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NoticeKind::Info => write!(f, "{}", self.text),
            NoticeKind::Warning => write!(f, "Warning in {}: {}", self.operation, self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn test_drain_empties_both_buffers() {
        let mut sink = MessageSink::new();
        write!(sink.info(), "Compiling model graph\n").unwrap();
        sink.push_error("unused variable");

        let drained = sink.drain();
        assert_eq!(drained.info.as_deref(), Some("Compiling model graph\n"));
        assert_eq!(drained.error.as_deref(), Some("unused variable"));
        assert_eq!(sink.drain(), Drained::default());
    }

    #[test]
    fn test_error_text_is_kept_verbatim() {
        let mut sink = MessageSink::new();
        sink.push_error("  line 3: syntax error\n");
        assert!(sink.has_error());
        assert_eq!(sink.take_error().as_deref(), Some("  line 3: syntax error\n"));
        assert!(!sink.has_error());
    }
}
