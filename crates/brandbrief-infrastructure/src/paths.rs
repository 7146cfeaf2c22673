//! Unified path management for brandbrief configuration and data files.
//!
//! All file-backed services resolve their locations through `BriefPaths` so
//! the layout stays consistent across platforms and tests can redirect
//! everything under one temporary directory.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/brandbrief/            # Config directory
//! ├── config.toml                  # Application configuration
//! ├── secret.json                  # API keys
//! ├── tokens.json                  # Bearer token -> user id map
//! └── profile_cache.json           # Device cache snapshot
//!
//! ~/.local/share/brandbrief/       # Data directory
//! └── profiles/                    # One profile document per user id
//!     ├── <user-id-1>.json
//!     └── <user-id-2>.json
//! ```

use brandbrief_core::error::{BriefError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "brandbrief";

/// Path resolution for brandbrief files.
///
/// With a base override (used by tests and the `--data-dir` flag) both the
/// config and data trees live under that base; otherwise the platform's
/// standard config and data directories are used.
#[derive(Debug, Clone, Default)]
pub struct BriefPaths {
    base: Option<PathBuf>,
}

impl BriefPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| BriefError::config("Cannot find config directory"))
    }

    /// Returns the data directory (larger, per-user documents).
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| BriefError::config("Cannot find data directory"))
    }

    /// Path to the application configuration file.
    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Path to the secrets file (API keys). Keep permissions tight.
    pub fn secret_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Path to the bearer-token map used by the HTTP surface.
    pub fn tokens_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("tokens.json"))
    }

    /// Path to the device cache snapshot.
    pub fn cache_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("profile_cache.json"))
    }

    /// Directory holding one profile document per user id.
    pub fn profiles_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("profiles"))
    }
}
