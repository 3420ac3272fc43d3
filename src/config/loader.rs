// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_CHAINS, DEFAULT_MONITOR_TYPE, DEFAULT_PROGRESS_WIDTH, DEFAULT_THIN,
};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Session-level settings.
///
/// # Example
/// ```yaml
/// update:
///   progress: true
///   width: 40
///   refresh: 10
/// monitors:
///   type: trace
///   thin: 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub update: UpdateOptions,
    #[serde(default)]
    pub monitors: MonitorDefaults,
}

/// How updates are chunked and displayed.
///
/// # Fields
/// * `progress` - Print the text progress bar (defaults to true)
/// * `width` - Ticks per progress row (defaults to 40)
/// * `refresh` - Fixed iterations per chunk; derived from `width` when unset
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UpdateOptions {
    #[serde(default = "default_progress")]
    pub progress: bool,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default)]
    pub refresh: Option<u32>,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            progress: default_progress(),
            width: default_width(),
            refresh: None,
        }
    }
}

/// Monitor type and thinning applied where a monitor entry leaves them out.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MonitorDefaults {
    #[serde(rename = "type", default = "default_monitor_type")]
    pub monitor_type: String,
    #[serde(default = "default_thin")]
    pub thin: u32,
}

impl Default for MonitorDefaults {
    fn default() -> Self {
        Self {
            monitor_type: default_monitor_type(),
            thin: default_thin(),
        }
    }
}

/// A declarative model run.
///
/// Relative paths are resolved against the directory of the configuration
/// file by [`load_config`].
///
/// # Example
/// ```yaml
/// model: models/line.bug
/// data: data/line.json
/// chains: 2
/// inits: [inits/chain1.json, inits/chain2.json]
/// rng_names: ["base::Wichmann-Hill", "base::Marsaglia-Multicarry"]
/// adapt: 500
/// burn_in: 1000
/// iterations: 5000
/// monitors:
///   - variable: alpha
///   - variable: beta
///     thin: 5
///   - variable: sigma
///     type: mean
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunConfig {
    pub model: PathBuf,
    #[serde(default)]
    pub data: Option<PathBuf>,
    #[serde(default = "default_chains")]
    pub chains: u32,
    #[serde(default)]
    pub generate_data: bool,
    #[serde(default)]
    pub inits: Vec<PathBuf>,
    #[serde(default)]
    pub rng_names: Vec<String>,
    #[serde(default)]
    pub adapt: u32,
    #[serde(default)]
    pub burn_in: u32,
    pub iterations: u32,
    #[serde(default)]
    pub monitors: Vec<MonitorConfig>,
    #[serde(default)]
    pub session: SessionConfig,
}

/// One monitored variable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MonitorConfig {
    pub variable: String,
    #[serde(default)]
    pub thin: Option<u32>,
    #[serde(rename = "type", default)]
    pub monitor_type: Option<String>,
}

impl MonitorConfig {
    pub fn thin_or(&self, defaults: &MonitorDefaults) -> u32 {
        self.thin.unwrap_or(defaults.thin)
    }

    pub fn type_or<'a>(&'a self, defaults: &'a MonitorDefaults) -> &'a str {
        self.monitor_type
            .as_deref()
            .unwrap_or(&defaults.monitor_type)
    }
}

impl RunConfig {
    /// Monitor types in first-use order, without repeats.
    pub fn monitor_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for monitor in &self.monitors {
            let monitor_type = monitor.type_or(&self.session.monitors);
            if !types.iter().any(|t| t == monitor_type) {
                types.push(monitor_type.to_string());
            }
        }
        types
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.model);
        if let Some(data) = self.data.as_mut() {
            resolve(data);
        }
        self.inits.iter_mut().for_each(resolve);
    }
}

fn default_progress() -> bool {
    true
}

fn default_width() -> u32 {
    DEFAULT_PROGRESS_WIDTH
}

fn default_monitor_type() -> String {
    DEFAULT_MONITOR_TYPE.to_string()
}

fn default_thin() -> u32 {
    DEFAULT_THIN
}

fn default_chains() -> u32 {
    DEFAULT_CHAINS
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load session settings from a YAML file
pub fn load_session_config<P: AsRef<Path>>(path: P) -> Result<SessionConfig, ConfigError> {
    let content = read(path.as_ref())?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Load a run configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let path = path.as_ref();
    let content = read(path)?;
    let mut cfg: RunConfig = serde_yaml::from_str(&content)?;
    if let Some(base) = path.parent() {
        cfg.resolve_paths(base);
    }
    Ok(cfg)
}

/// Load a run configuration and check it against every rule at once
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_run_config(&cfg).map_err(ConfigError::Validation)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_run_config() {
        let yaml = r#"
model: line.bug
iterations: 1000
"#;

        let cfg: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.chains, 1);
        assert_eq!(cfg.adapt, 0);
        assert!(cfg.monitors.is_empty());
        assert_eq!(cfg.session, SessionConfig::default());
        assert_eq!(cfg.session.update.width, 40);
        assert_eq!(cfg.session.monitors.monitor_type, "trace");
    }

    #[test]
    fn monitor_entries_fall_back_to_session_defaults() {
        let yaml = r#"
model: line.bug
iterations: 10
monitors:
  - variable: alpha
  - variable: beta
    thin: 5
    type: mean
session:
  monitors:
    thin: 2
"#;

        let cfg: RunConfig = serde_yaml::from_str(yaml).unwrap();
        let defaults = &cfg.session.monitors;
        assert_eq!(cfg.monitors[0].thin_or(defaults), 2);
        assert_eq!(cfg.monitors[0].type_or(defaults), "trace");
        assert_eq!(cfg.monitors[1].thin_or(defaults), 5);
        assert_eq!(cfg.monitor_types(), vec!["trace", "mean"]);
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        std::fs::write(
            &path,
            "model: line.bug\ndata: /abs/data.json\ninits: [i1.json]\niterations: 5\n",
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.model, dir.path().join("line.bug"));
        assert_eq!(cfg.data, Some(PathBuf::from("/abs/data.json")));
        assert_eq!(cfg.inits, vec![dir.path().join("i1.json")]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
