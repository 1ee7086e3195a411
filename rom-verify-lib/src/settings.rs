//! Verification settings.
//!
//! Values come from three layers, lowest priority first: built-in defaults,
//! an optional TOML file (`~/.config/rom-verify/config.toml` unless a path is
//! given explicitly), and command-line overrides applied by the caller.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::archive::ArchivePolicy;
use crate::error::ConfigError;
use crate::hasher::DEFAULT_HEADER_LEN;

/// Directory names pruned from every scan by default.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["[ROM Hacks]", "[Translations]", "[Nintendo Vs. System]"];

/// Region marker used to filter catalog entries by default.
pub const DEFAULT_REGION: &str = "(USA)";

/// Everything a verification run needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyConfig {
    /// ROM directories to scan, used when none are given on the command line
    pub roots: Vec<PathBuf>,
    /// Reference DAT to verify against
    pub dat_file: PathBuf,
    /// Where the list of missing entries is written
    pub missing_file: PathBuf,
    /// Directory names that are never descended into, at any depth
    pub excluded_dirs: Vec<String>,
    /// Region markers to report on; the first one drives the summary.
    /// A game counts towards a region when its name contains the marker.
    pub regions: Vec<String>,
    /// Bytes stripped from the front of every payload before hashing
    pub header_len: usize,
    /// Archive extensions to check (case-insensitive, without the dot)
    pub extensions: Vec<String>,
    pub archive_policy: ArchivePolicy,
    /// Checksum worker threads; 0 uses all available cores
    pub jobs: usize,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            dat_file: PathBuf::from("nes.dat"),
            missing_file: PathBuf::from("MISSING"),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            regions: vec![DEFAULT_REGION.to_string()],
            header_len: DEFAULT_HEADER_LEN,
            extensions: vec!["zip".to_string()],
            archive_policy: ArchivePolicy::default(),
            jobs: 1,
        }
    }
}

impl VerifyConfig {
    /// Check the settings that have no usable fallback.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roots.is_empty() {
            return Err(ConfigError::invalid("no ROM directories given"));
        }
        if self.regions.is_empty() {
            return Err(ConfigError::invalid("no region markers given"));
        }
        Ok(())
    }

    /// Number of worker threads to use for checksumming.
    pub fn effective_jobs(&self) -> usize {
        if self.jobs == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.jobs
        }
    }
}

/// Canonical path to the user config file: `~/.config/rom-verify/config.toml`.
pub fn config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("rom-verify").join("config.toml")
}

/// Parse settings from TOML text. Missing keys keep their defaults.
pub fn parse_config(text: &str) -> Result<VerifyConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Load settings.
///
/// An explicit path must exist and parse. Without one, the default config
/// file is used if present, and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<VerifyConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = config_path();
            if !default.is_file() {
                return Ok(VerifyConfig::default());
            }
            default
        }
    };

    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&text).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    log::debug!("Loaded settings from {}", path.display());
    Ok(config)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
