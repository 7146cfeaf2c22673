//! Directory-backed profile store implementation.
//!
//! One profile document = one JSON file named after the owning user id.
//! Upsert replaces the whole document through a temp file and rename, which
//! makes it idempotent and last-write-wins per document.

use crate::paths::BriefPaths;
use brandbrief_core::error::{BriefError, Result};
use brandbrief_core::profile::{Profile, ProfileStore};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Profile store backed by a directory of per-user JSON documents.
pub struct DirProfileStore {
    dir: PathBuf,
}

impl DirProfileStore {
    /// Creates a store at the default platform location.
    pub async fn default() -> Result<Self> {
        Self::new(None).await
    }

    /// Creates a store with a custom base directory (for testing).
    pub async fn new(base_dir: Option<&Path>) -> Result<Self> {
        let dir = BriefPaths::new(base_dir).profiles_dir()?;
        fs::create_dir_all(&dir)
            .await
            .map_err(|err| BriefError::store(format!("create {dir:?}: {err}")))?;
        Ok(Self { dir })
    }

    fn document_path(&self, user_id: &str) -> PathBuf {
        // User ids are opaque; keep the file name safe regardless of content.
        let safe: String = user_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

#[async_trait::async_trait]
impl ProfileStore for DirProfileStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Profile>> {
        let path = self.document_path(user_id);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(BriefError::store(format!("read {path:?}: {err}"))),
        };

        let document: serde_json::Value = serde_json::from_str(&content)
            .map_err(|err| BriefError::store(format!("parse {path:?}: {err}")))?;
        Ok(Some(Profile::from_document(document)))
    }

    async fn upsert(&self, user_id: &str, profile: &Profile) -> Result<Profile> {
        let path = self.document_path(user_id);
        let content = serde_json::to_string_pretty(profile)
            .map_err(|err| BriefError::store(format!("serialize profile: {err}")))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .await
            .map_err(|err| BriefError::store(format!("write {tmp:?}: {err}")))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|err| BriefError::store(format!("rename into {path:?}: {err}")))?;

        tracing::debug!("stored profile document for user {user_id}");
        Ok(profile.clone())
    }
}
