// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Run configuration validation.
//!
//! Every rule is checked and every violation reported, so a broken file can
//! be fixed in one pass:
//!
//! 1. **Chains**: at least one chain, and no more init files or RNG names
//!    than chains
//! 2. **Update options**: a non-zero row width and, when set, a non-zero
//!    refresh granularity
//! 3. **Monitors**: non-zero thinning, non-empty names, and no variable
//!    monitored twice with the same type
//!
//! # Example
//! ```rust
//! use gibbs_bridge::config::{validate_run_config, MonitorConfig, RunConfig, SessionConfig};
//! use gibbs_bridge::errors::ValidationError;
//! use std::path::PathBuf;
//!
//! let config = RunConfig {
//!     model: PathBuf::from("line.bug"),
//!     data: None,
//!     chains: 0,
//!     generate_data: false,
//!     inits: vec![],
//!     rng_names: vec![],
//!     adapt: 0,
//!     burn_in: 0,
//!     iterations: 100,
//!     monitors: vec![MonitorConfig { variable: "mu".into(), thin: Some(0), monitor_type: None }],
//!     session: SessionConfig::default(),
//! };
//!
//! let errors = validate_run_config(&config).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! assert!(matches!(errors[0], ValidationError::InvalidChainCount { chains: 0 }));
//! ```

use std::collections::HashSet;

use crate::config::RunConfig;
use crate::errors::ValidationError;

/// Check a run configuration, collecting every violation.
pub fn validate_run_config(config: &RunConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_chains(config, &mut errors);
    validate_update_options(config, &mut errors);
    validate_monitors(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_chains(config: &RunConfig, errors: &mut Vec<ValidationError>) {
    if config.chains == 0 {
        errors.push(ValidationError::InvalidChainCount {
            chains: config.chains,
        });
    }

    let per_chain = [("inits", config.inits.len()), ("rng", config.rng_names.len())];
    for (setting, given) in per_chain {
        if given > config.chains as usize {
            errors.push(ValidationError::TooManyChainSettings {
                setting,
                given,
                chains: config.chains,
            });
        }
    }
}

fn validate_update_options(config: &RunConfig, errors: &mut Vec<ValidationError>) {
    let update = &config.session.update;
    if update.width == 0 {
        errors.push(ValidationError::InvalidProgressWidth {
            width: update.width,
        });
    }
    if update.refresh == Some(0) {
        errors.push(ValidationError::InvalidRefresh);
    }
}

fn validate_monitors(config: &RunConfig, errors: &mut Vec<ValidationError>) {
    let defaults = &config.session.monitors;
    if defaults.thin == 0 {
        errors.push(ValidationError::InvalidThinning { variable: None });
    }

    let mut seen = HashSet::new();
    for (index, monitor) in config.monitors.iter().enumerate() {
        if monitor.variable.is_empty() {
            errors.push(ValidationError::EmptyMonitorName { index });
            continue;
        }
        if monitor.thin == Some(0) {
            errors.push(ValidationError::InvalidThinning {
                variable: Some(monitor.variable.clone()),
            });
        }
        let monitor_type = monitor.type_or(defaults);
        if !seen.insert((monitor.variable.as_str(), monitor_type)) {
            errors.push(ValidationError::DuplicateMonitor {
                variable: monitor.variable.clone(),
                monitor_type: monitor_type.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MonitorConfig, SessionConfig};
    use std::path::PathBuf;

    fn config() -> RunConfig {
        RunConfig {
            model: PathBuf::from("model.bug"),
            data: None,
            chains: 2,
            generate_data: false,
            inits: vec![],
            rng_names: vec![],
            adapt: 100,
            burn_in: 100,
            iterations: 1000,
            monitors: vec![],
            session: SessionConfig::default(),
        }
    }

    fn monitor(variable: &str, thin: Option<u32>, monitor_type: Option<&str>) -> MonitorConfig {
        MonitorConfig {
            variable: variable.to_string(),
            thin,
            monitor_type: monitor_type.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_config() {
        let mut cfg = config();
        cfg.monitors = vec![
            monitor("mu", None, None),
            monitor("mu", None, Some("mean")),
            monitor("tau", Some(10), None),
        ];
        assert!(validate_run_config(&cfg).is_ok());
    }

    #[test]
    fn test_too_many_chain_settings() {
        let mut cfg = config();
        cfg.inits = vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")];
        cfg.rng_names = vec!["x".into(); 3];

        let errors = validate_run_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::TooManyChainSettings {
                    setting: "inits",
                    given: 3,
                    chains: 2
                },
                ValidationError::TooManyChainSettings {
                    setting: "rng",
                    given: 3,
                    chains: 2
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_monitor_uses_default_type() {
        let mut cfg = config();
        cfg.monitors = vec![monitor("mu", None, None), monitor("mu", Some(2), Some("trace"))];

        let errors = validate_run_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateMonitor {
                variable: "mu".to_string(),
                monitor_type: "trace".to_string()
            }]
        );
    }

    #[test]
    fn test_all_violations_reported_together() {
        let mut cfg = config();
        cfg.session.update.width = 0;
        cfg.session.update.refresh = Some(0);
        cfg.session.monitors.thin = 0;
        cfg.monitors = vec![monitor("", None, None), monitor("beta", Some(0), None)];

        let errors = validate_run_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::InvalidRefresh));
        assert!(errors.contains(&ValidationError::EmptyMonitorName { index: 0 }));
        assert!(errors.contains(&ValidationError::InvalidThinning {
            variable: Some("beta".to_string())
        }));
    }
}
