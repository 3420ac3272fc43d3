// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during run configuration validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A run needs at least one chain
    InvalidChainCount {
        /// The configured chain count
        chains: u32,
    },
    /// A monitor or the monitor defaults ask for a thinning interval of zero
    InvalidThinning {
        /// The monitored variable, or `None` for the session defaults
        variable: Option<String>,
    },
    /// The progress row must hold at least one tick
    InvalidProgressWidth {
        /// The configured row width
        width: u32,
    },
    /// A fixed refresh granularity of zero would never advance
    InvalidRefresh,
    /// A monitor entry has no variable name
    EmptyMonitorName {
        /// Position of the entry in the monitor list
        index: usize,
    },
    /// The same variable is monitored twice with the same monitor type
    DuplicateMonitor {
        /// The monitored variable
        variable: String,
        /// The monitor type
        monitor_type: String,
    },
    /// More per-chain settings were supplied than there are chains
    TooManyChainSettings {
        /// Which setting overflowed ("inits" or "rng")
        setting: &'static str,
        /// How many entries were configured
        given: usize,
        /// The configured chain count
        chains: u32,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidChainCount { chains } => {
                write!(f, "Chain count must be at least 1, got {}", chains)
            }
            ValidationError::InvalidThinning { variable } => match variable {
                Some(variable) => write!(
                    f,
                    "Monitor for '{}' has a thinning interval of 0; it must be at least 1",
                    variable
                ),
                None => write!(f, "Default monitor thinning must be at least 1"),
            },
            ValidationError::InvalidProgressWidth { width } => {
                write!(f, "Progress width must be at least 1, got {}", width)
            }
            ValidationError::InvalidRefresh => {
                write!(f, "Update refresh granularity must be at least 1 when set")
            }
            ValidationError::EmptyMonitorName { index } => {
                write!(f, "Monitor entry {} has an empty variable name", index)
            }
            ValidationError::DuplicateMonitor {
                variable,
                monitor_type,
            } => {
                write!(
                    f,
                    "Variable '{}' is monitored more than once with type '{}'",
                    variable, monitor_type
                )
            }
            ValidationError::TooManyChainSettings {
                setting,
                given,
                chains,
            } => {
                write!(
                    f,
                    "{} {} entries configured for only {} chain(s)",
                    given, setting, chains
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading configuration and the files it references.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration or referenced data file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML document did not match the configuration schema.
    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A referenced JSON data file was malformed.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration parsed but breaks one or more rules.
    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
