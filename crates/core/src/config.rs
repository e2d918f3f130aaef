// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Toolbox configuration
//!
//! Loaded from `colawater.toml`. Every key is optional; command-line flags
//! take precedence over anything set here.

use crate::asset::AssetType;
use crate::scan;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name looked up by [`Config::discover`]
pub const CONFIG_FILE: &str = "colawater.toml";

/// Interval used when none is configured
pub const DEFAULT_INTERVAL: u64 = 2;

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("interval must be greater than zero")]
    ZeroInterval,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Value marking rows that await an identifier
    pub placeholder: Option<String>,
    pub interval: Option<u64>,
    /// Directory holding record drawing scans
    pub scan_dir: Option<PathBuf>,
    pub scan_cache_capacity: Option<usize>,
    /// Table for each asset type
    pub layers: BTreeMap<AssetType, PathBuf>,
}

impl Config {
    /// Parse configuration text; relative paths stay relative
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a config file, resolving relative paths against its directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.interval == Some(0) {
            return Err(ConfigError::ZeroInterval);
        }

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for layer in config.layers.values_mut() {
            if layer.is_relative() {
                *layer = base.join(&*layer);
            }
        }
        if let Some(dir) = config.scan_dir.as_mut() {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }

        tracing::debug!(path = %path.display(), layers = config.layers.len(), "loaded config");
        Ok(config)
    }

    /// Find a config file: `dir/colawater.toml`, then the user config
    /// directory
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        let local = dir.join(CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|d| d.join("colawater").join(CONFIG_FILE))
            .filter(|p| p.is_file())
    }

    /// Configured placeholder, else one derived from the login name
    pub fn placeholder(&self) -> Option<String> {
        self.placeholder.clone().or_else(|| {
            std::env::var("USER")
                .or_else(|_| std::env::var("USERNAME"))
                .ok()
                .and_then(|user| placeholder_for(&user))
        })
    }

    pub fn interval(&self) -> u64 {
        self.interval.unwrap_or(DEFAULT_INTERVAL)
    }

    pub fn scan_cache_capacity(&self) -> usize {
        self.scan_cache_capacity.unwrap_or(scan::DEFAULT_CAPACITY)
    }

    pub fn layer(&self, asset: AssetType) -> Option<&Path> {
        self.layers.get(&asset).map(PathBuf::as_path)
    }
}

/// First three characters of a login name, uppercased
pub fn placeholder_for(user: &str) -> Option<String> {
    let initials: String = user.chars().take(3).flat_map(char::to_uppercase).collect();
    (!initials.is_empty()).then_some(initials)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
