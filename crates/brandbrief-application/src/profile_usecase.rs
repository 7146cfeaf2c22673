//! Profile use case.
//!
//! Orchestrates the two persistence tiers around one profile: the local
//! device cache (fast, non-authoritative) and the profile store
//! (authoritative, keyed by user id).

use brandbrief_core::cache::DeviceCache;
use brandbrief_core::error::{BriefError, Result};
use brandbrief_core::identity::{IdentityResolver, UserIdentity};
use brandbrief_core::profile::{Profile, ProfileStore};
use std::sync::Arc;

/// Use case for loading and saving the current user's profile.
///
/// The device cache is optional: the multi-user HTTP surface runs store-only
/// (the cache tier belongs to a single user's device), while the local
/// single-user flows run cache-first with write-through.
pub struct ProfileUseCase {
    identity: Arc<dyn IdentityResolver>,
    store: Arc<dyn ProfileStore>,
    cache: Option<Arc<dyn DeviceCache>>,
}

impl ProfileUseCase {
    pub fn new(identity: Arc<dyn IdentityResolver>, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            identity,
            store,
            cache: None,
        }
    }

    /// Attaches a device cache tier.
    pub fn with_cache(mut self, cache: Arc<dyn DeviceCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    async fn resolve(&self, bearer_token: Option<&str>) -> Result<UserIdentity> {
        self.identity
            .current_user(bearer_token)
            .await
            .ok_or(BriefError::Unauthorized)
    }

    /// The raw stored profile, or `None` when the user has no document yet.
    ///
    /// Store failures propagate; this is the `GET /profile` surface, which
    /// reports rather than degrades.
    pub async fn fetch_stored(&self, bearer_token: Option<&str>) -> Result<Option<Profile>> {
        let user = self.resolve(bearer_token).await?;
        self.store.find_by_user(&user.id).await
    }

    /// Dual-tier load for the intake flow.
    ///
    /// The cache snapshot stands in until the store answers. A stored record
    /// wins and is written back over the cache; no record leaves the cached
    /// value (or the default profile) in place; a store failure degrades to
    /// the same fallback instead of surfacing.
    pub async fn load(&self, bearer_token: Option<&str>) -> Result<Profile> {
        let user = self.resolve(bearer_token).await?;
        let cached = self.cached_snapshot();

        match self.store.find_by_user(&user.id).await {
            Ok(Some(profile)) => {
                self.write_cache(&profile);
                Ok(profile)
            }
            Ok(None) => Ok(cached.unwrap_or_default()),
            Err(err) => {
                tracing::error!("profile load failed, serving cached snapshot: {err}");
                Ok(cached.unwrap_or_default())
            }
        }
    }

    /// Persists the full profile document for the current user.
    ///
    /// The upsert is idempotent and last-write-wins. On success the fresh
    /// remote data also overwrites the cache; on failure the cache keeps the
    /// unsaved edits and the error surfaces to the caller.
    pub async fn save(&self, bearer_token: Option<&str>, profile: &Profile) -> Result<Profile> {
        let user = self.resolve(bearer_token).await?;
        let persisted = self.store.upsert(&user.id, profile).await?;
        self.write_cache(&persisted);
        Ok(persisted)
    }

    /// Last-known snapshot from the device cache; failures count as empty.
    pub fn cached_snapshot(&self) -> Option<Profile> {
        let cache = self.cache.as_ref()?;
        match cache.read() {
            Ok(snapshot) => snapshot.map(|cached| cached.profile),
            Err(err) => {
                tracing::warn!("device cache read failed, treating as empty: {err}");
                None
            }
        }
    }

    fn write_cache(&self, profile: &Profile) {
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.write(profile) {
                tracing::warn!("device cache write failed, continuing: {err}");
            }
        }
    }
}
