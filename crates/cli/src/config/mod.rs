// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration loading.
//!
//! A grading config is a JSON document (or TOML, by file extension) with an
//! optional `environment` section, an optional default `timeout`, and the
//! ordered `checks` list. Check entries are kept as raw values; the registry
//! validates them when building checks.

mod duration;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

pub use duration::parse_duration;

use crate::error::{Error, Result};

/// Placeholder replaced with the config file's directory before parsing.
pub const CONFIG_DIR_PLACEHOLDER: &str = "${{config_dir}}";

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["environment", "timeout", "checks"];

/// Full configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    /// Global environment settings.
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Default time limit for each tool invocation.
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub timeout: Option<Duration>,

    /// Check specifications in declaration order.
    #[serde(default)]
    pub checks: Option<Vec<Value>>,
}

/// `environment` section.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EnvironmentConfig {
    /// Variables applied to every check, over the process environment.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,

    /// Interpreter used to create the sandbox.
    #[serde(default)]
    pub python: Option<String>,

    /// Tool packages installed into the sandbox (None = defaults).
    #[serde(default)]
    pub tool_packages: Option<Vec<String>>,
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from the file extension; JSON unless `.toml`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Load config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("cannot read configuration file: {e}"),
        path: Some(path.to_path_buf()),
    })?;

    let config_dir = std::path::absolute(path)
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let content = content.replace(CONFIG_DIR_PLACEHOLDER, &config_dir.to_string_lossy());

    parse(&content, ConfigFormat::from_path(path), Some(path))
}

/// Parse config from string content.
pub fn parse(content: &str, format: ConfigFormat, path: Option<&Path>) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: path.map(Path::to_path_buf),
    };

    let value: Value = match format {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| config_error(e.to_string()))?,
        ConfigFormat::Toml => {
            let table: toml::Value =
                toml::from_str(content).map_err(|e| config_error(e.to_string()))?;
            serde_json::to_value(table).map_err(|e| config_error(e.to_string()))?
        }
    };

    let Value::Object(map) = &value else {
        return Err(config_error("configuration must be an object".to_string()));
    };

    for key in map.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            tracing::warn!("unrecognized config field `{key}`, ignoring");
        }
    }

    serde_json::from_value(value).map_err(|e| config_error(e.to_string()))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
