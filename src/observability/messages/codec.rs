// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for host data conversion events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A zero-length host entry was left out of a data table.
///
/// # Log Level
/// `debug!` - Expected policy, useful when tracing data problems
pub struct EntryDropped<'a> {
    pub name: &'a str,
    pub host_type: &'static str,
}

impl Display for EntryDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dropping zero-length {} entry '{}' from data table",
            self.host_type, self.name
        )
    }
}

impl StructuredLog for EntryDropped<'_> {
    fn log(&self) {
        tracing::debug!(
            name = self.name,
            host_type = self.host_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "entry_dropped",
            span_name = name,
            name = self.name,
            host_type = self.host_type,
        )
    }
}

/// A host list was converted into a data table.
///
/// # Log Level
/// `debug!` - Per-call detail
pub struct TableDecoded {
    pub entries: usize,
    pub dropped: usize,
    pub missing: usize,
}

impl Display for TableDecoded {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Decoded data table: {} entries, {} dropped, {} missing values",
            self.entries, self.dropped, self.missing
        )
    }
}

impl StructuredLog for TableDecoded {
    fn log(&self) {
        tracing::debug!(
            entries = self.entries,
            dropped = self.dropped,
            missing = self.missing,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "table_decoded",
            span_name = name,
            entries = self.entries,
            dropped = self.dropped,
        )
    }
}
