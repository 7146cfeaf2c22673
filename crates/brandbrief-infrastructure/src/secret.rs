//! Secret configuration storage.
//!
//! API keys live in `secret.json` under the config directory, outside the
//! regular configuration file.

use crate::paths::BriefPaths;
use brandbrief_core::error::{BriefError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// OpenAI credentials and model selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiSecret {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAiSecret>,
}

/// Reads secret configuration from disk.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn default() -> Result<Self> {
        Self::new(None)
    }

    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let path = BriefPaths::new(base_dir).secret_file()?;
        Ok(Self { path })
    }

    /// Loads the secret config; a missing or empty file yields the default
    /// (no credentials configured).
    pub fn load(&self) -> Result<SecretConfig> {
        if !self.path.exists() {
            return Ok(SecretConfig::default());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|err| BriefError::config(format!("read {:?}: {err}", self.path)))?;
        if content.trim().is_empty() {
            return Ok(SecretConfig::default());
        }
        serde_json::from_str(&content)
            .map_err(|err| BriefError::config(format!("parse {:?}: {err}", self.path)))
    }
}
