//! In-memory doubles for the boundary traits, shared by the use case tests.

use brandbrief_core::cache::{CachedProfile, DeviceCache};
use brandbrief_core::error::{BriefError, Result};
use brandbrief_core::generation::TextGenerator;
use brandbrief_core::identity::{IdentityResolver, UserIdentity};
use brandbrief_core::profile::{Profile, ProfileStore};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory profile store.
#[derive(Default)]
pub(crate) struct MemoryStore {
    records: Mutex<HashMap<String, Profile>>,
    fail: bool,
}

impl MemoryStore {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn seed(&self, user_id: &str, profile: Profile) {
        self.records
            .lock()
            .unwrap()
            .insert(user_id.to_string(), profile);
    }
}

#[async_trait::async_trait]
impl ProfileStore for MemoryStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Profile>> {
        if self.fail {
            return Err(BriefError::store("connection reset"));
        }
        Ok(self.records.lock().unwrap().get(user_id).cloned())
    }

    async fn upsert(&self, user_id: &str, profile: &Profile) -> Result<Profile> {
        if self.fail {
            return Err(BriefError::store("connection reset"));
        }
        self.records
            .lock()
            .unwrap()
            .insert(user_id.to_string(), profile.clone());
        Ok(profile.clone())
    }
}

/// In-memory device cache.
#[derive(Default)]
pub(crate) struct MemoryCache {
    snapshot: Mutex<Option<Profile>>,
    fail: bool,
}

impl MemoryCache {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn seed(&self, profile: Profile) {
        *self.snapshot.lock().unwrap() = Some(profile);
    }

    pub(crate) fn snapshot(&self) -> Option<Profile> {
        self.snapshot.lock().unwrap().clone()
    }
}

impl DeviceCache for MemoryCache {
    fn read(&self) -> Result<Option<CachedProfile>> {
        if self.fail {
            return Err(BriefError::cache("unreadable"));
        }
        Ok(self.snapshot().map(CachedProfile::now))
    }

    fn write(&self, profile: &Profile) -> Result<()> {
        if self.fail {
            return Err(BriefError::cache("unwritable"));
        }
        self.seed(profile.clone());
        Ok(())
    }
}

/// Resolves every request to one fixed user.
pub(crate) struct StaticResolver {
    id: String,
}

impl StaticResolver {
    pub(crate) fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

#[async_trait::async_trait]
impl IdentityResolver for StaticResolver {
    async fn current_user(&self, _bearer_token: Option<&str>) -> Option<UserIdentity> {
        Some(UserIdentity::new(self.id.clone()))
    }
}

/// Resolves nobody, ever.
pub(crate) struct NobodyResolver;

#[async_trait::async_trait]
impl IdentityResolver for NobodyResolver {
    async fn current_user(&self, _bearer_token: Option<&str>) -> Option<UserIdentity> {
        None
    }
}

/// Returns the prompt it was handed, for asserting on prompt assembly.
pub(crate) struct EchoGenerator;

#[async_trait::async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(prompt.to_string())
    }
}

/// Always fails like a backend outage.
pub(crate) struct FailingGenerator;

#[async_trait::async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(BriefError::generation("backend unavailable"))
    }
}
