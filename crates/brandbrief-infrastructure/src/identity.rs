//! Identity resolver implementations.
//!
//! Identity itself is external; these resolvers only map a credential the
//! delivery layer already holds onto the opaque owning user id.

use crate::paths::BriefPaths;
use brandbrief_core::error::{BriefError, Result};
use brandbrief_core::identity::{IdentityResolver, UserIdentity};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Resolves every request to one fixed user id.
///
/// Suitable for the local wizard CLI and development, where the process
/// itself is the session.
#[derive(Debug, Clone)]
pub struct SingleUserIdentityResolver {
    user_id: String,
}

impl SingleUserIdentityResolver {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl Default for SingleUserIdentityResolver {
    fn default() -> Self {
        Self::new("local")
    }
}

#[async_trait::async_trait]
impl IdentityResolver for SingleUserIdentityResolver {
    async fn current_user(&self, _bearer_token: Option<&str>) -> Option<UserIdentity> {
        Some(UserIdentity::new(self.user_id.clone()))
    }
}

/// Resolves bearer tokens against a token -> user id map loaded from
/// `tokens.json` in the config directory.
///
/// ```json
/// { "s3cr3t-token": "user-1", "another-token": "user-2" }
/// ```
///
/// Requests without a token, or with a token outside the map, resolve to
/// nothing and fail `Unauthorized` upstream.
pub struct TokenFileIdentityResolver {
    tokens: HashMap<String, String>,
}

impl TokenFileIdentityResolver {
    /// Loads the token map from the config directory; a missing file yields
    /// an empty map (every request unauthorized).
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let path = BriefPaths::new(base_dir).tokens_file()?;
        if !path.exists() {
            tracing::warn!("no token map at {path:?}; all requests will be unauthorized");
            return Ok(Self {
                tokens: HashMap::new(),
            });
        }

        let content = fs::read_to_string(&path)
            .map_err(|err| BriefError::config(format!("read {path:?}: {err}")))?;
        let tokens: HashMap<String, String> = serde_json::from_str(&content)
            .map_err(|err| BriefError::config(format!("parse {path:?}: {err}")))?;
        Ok(Self { tokens })
    }

    /// Builds a resolver from an in-memory map (tests, `--auth-token` flag).
    pub fn from_tokens(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

#[async_trait::async_trait]
impl IdentityResolver for TokenFileIdentityResolver {
    async fn current_user(&self, bearer_token: Option<&str>) -> Option<UserIdentity> {
        let token = bearer_token?;
        self.tokens
            .get(token)
            .map(|user_id| UserIdentity::new(user_id.clone()))
    }
}
