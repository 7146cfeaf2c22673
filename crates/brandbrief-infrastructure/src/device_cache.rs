//! File-backed device cache implementation.
//!
//! One JSON envelope file holds the most recently known profile snapshot.
//! Reads are synchronous so the intake form can populate before any remote
//! call completes; writes happen on every field edit, so they go through a
//! temp file and an atomic rename to keep the snapshot whole under crashes.

use crate::paths::BriefPaths;
use brandbrief_core::cache::{CachedProfile, DeviceCache};
use brandbrief_core::error::{BriefError, Result};
use brandbrief_core::profile::Profile;
use std::fs;
use std::path::{Path, PathBuf};

/// Device cache stored as a single JSON file under the config directory.
pub struct JsonFileDeviceCache {
    path: PathBuf,
}

impl JsonFileDeviceCache {
    /// Creates a cache at the default platform location.
    pub fn default() -> Result<Self> {
        Self::new(None)
    }

    /// Creates a cache with a custom base directory (for testing).
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let path = BriefPaths::new(base_dir).cache_file()?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeviceCache for JsonFileDeviceCache {
    fn read(&self) -> Result<Option<CachedProfile>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|err| BriefError::cache(format!("read {:?}: {err}", self.path)))?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<CachedProfile>(&content) {
            Ok(cached) => Ok(Some(cached)),
            Err(err) => {
                // Corrupt content is treated as an empty cache, not a failure.
                tracing::warn!("device cache at {:?} is corrupt, ignoring: {err}", self.path);
                Ok(None)
            }
        }
    }

    fn write(&self, profile: &Profile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| BriefError::cache(format!("create {parent:?}: {err}")))?;
        }

        let envelope = CachedProfile::now(profile.clone());
        let content = serde_json::to_string_pretty(&envelope)
            .map_err(|err| BriefError::cache(format!("serialize snapshot: {err}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .map_err(|err| BriefError::cache(format!("write {tmp:?}: {err}")))?;
        fs::rename(&tmp, &self.path)
            .map_err(|err| BriefError::cache(format!("rename into {:?}: {err}", self.path)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_cache_reads_none() {
        let temp = TempDir::new().unwrap();
        let cache = JsonFileDeviceCache::new(Some(temp.path())).unwrap();
        assert!(cache.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp = TempDir::new().unwrap();
        let cache = JsonFileDeviceCache::new(Some(temp.path())).unwrap();

        let mut profile = Profile::default();
        profile.business_name = "Acme".to_string();
        cache.write(&profile).unwrap();

        let cached = cache.read().unwrap().unwrap();
        assert_eq!(cached.profile, profile);
    }

    #[test]
    fn test_write_overwrites_previous_snapshot() {
        let temp = TempDir::new().unwrap();
        let cache = JsonFileDeviceCache::new(Some(temp.path())).unwrap();

        let mut profile = Profile::default();
        profile.business_name = "First".to_string();
        cache.write(&profile).unwrap();
        profile.business_name = "Second".to_string();
        cache.write(&profile).unwrap();

        let cached = cache.read().unwrap().unwrap();
        assert_eq!(cached.profile.business_name, "Second");
    }

    #[test]
    fn test_corrupt_cache_reads_none() {
        let temp = TempDir::new().unwrap();
        let cache = JsonFileDeviceCache::new(Some(temp.path())).unwrap();
        fs::write(cache.path(), "{ not json").unwrap();
        assert!(cache.read().unwrap().is_none());
    }
}
