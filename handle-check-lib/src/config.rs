//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and from
//! `HC_*` environment variables. Precedence is resolved by the CLI:
//! CLI flags > environment > local config file > home config file >
//! XDG config file > built-in defaults.

use crate::error::HandleCheckError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML files.
///
/// This represents the structure of config files users can create to
/// set default values, e.g.:
///
/// ```toml
/// [defaults]
/// concurrency = 8
/// timeout = "5s"
/// platforms = ["github", "reddit"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default concurrency level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Default per-request timeout (as string, e.g. "5s", "30s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Default per-probe courtesy delay in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courtesy_delay_ms: Option<u64>,

    /// Default platform subset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,

    /// Default pretty output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load a config file from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns `HandleCheckError::ConfigError` if the file cannot be
    /// read or parsed.
    pub fn load_file(&self, path: &str) -> Result<FileConfig, HandleCheckError> {
        let content = fs::read_to_string(path).map_err(|e| {
            HandleCheckError::config(format!("cannot read config file '{}': {}", path, e))
        })?;

        let config: FileConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Discover and load the first config file found.
    ///
    /// Search order:
    /// 1. `./.handle-check.toml` (project-local)
    /// 2. `~/.handle-check.toml` (home)
    /// 3. `~/.config/handle-check/config.toml` (XDG)
    ///
    /// Returns an empty `FileConfig` when no file exists.
    pub fn discover_and_load(&self) -> Result<FileConfig, HandleCheckError> {
        for candidate in self.candidate_paths() {
            if candidate.exists() {
                if self.verbose {
                    tracing::debug!(path = %candidate.display(), "loading config file");
                }
                return self.load_file(&candidate.to_string_lossy());
            }
        }

        Ok(FileConfig::default())
    }

    fn candidate_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./.handle-check.toml")];

        if let Some(home) = env::var_os("HOME") {
            let home = Path::new(&home);
            paths.push(home.join(".handle-check.toml"));
            paths.push(home.join(".config/handle-check/config.toml"));
        }

        paths
    }
}

/// Configuration collected from `HC_*` environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub concurrency: Option<usize>,
    pub timeout: Option<String>,
    pub platforms: Option<Vec<String>>,
    pub pretty: Option<bool>,
}

/// Read `HC_*` environment variables into an `EnvConfig`.
///
/// Unparseable values are skipped (with a warning when `verbose`),
/// never fatal.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    let mut config = EnvConfig::default();

    if let Ok(value) = env::var("HC_CONCURRENCY") {
        match value.parse::<usize>() {
            Ok(n) if n >= 1 => config.concurrency = Some(n),
            _ => {
                if verbose {
                    tracing::warn!(value = %value, "ignoring invalid HC_CONCURRENCY");
                }
            }
        }
    }

    if let Ok(value) = env::var("HC_TIMEOUT") {
        config.timeout = Some(value);
    }

    if let Ok(value) = env::var("HC_PLATFORMS") {
        let platforms: Vec<String> = value
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !platforms.is_empty() {
            config.platforms = Some(platforms);
        }
    }

    if let Ok(value) = env::var("HC_PRETTY") {
        config.pretty = parse_bool_value(&value);
    }

    config
}

/// Parse common boolean spellings used in env vars.
fn parse_bool_value(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
