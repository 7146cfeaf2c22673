//! Application configuration loaded from `config.toml`.
//!
//! Everything here is optional; command-line flags win over the file and
//! the file wins over built-in defaults.

use anyhow::{Context, Result};
use brandbrief_infrastructure::BriefPaths;
use serde::Deserialize;
use std::path::Path;

/// The default HTTP bind address when neither flag nor file provide one.
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP bind address for `serve`, e.g. "127.0.0.1:8787"
    pub bind: Option<String>,
    /// Generation model override, e.g. "gpt-4o-mini"
    pub model: Option<String>,
}

impl AppConfig {
    /// Loads `config.toml` from the config directory.
    ///
    /// A missing or empty file yields the default config; a file that exists
    /// but cannot be parsed is an error.
    pub fn load(base_dir: Option<&Path>) -> Result<Self> {
        let path = BriefPaths::new(base_dir)
            .config_file()
            .context("resolve config file path")?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("read config file {path:?}"))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(&content).with_context(|| format!("parse config file {path:?}"))
    }
}
