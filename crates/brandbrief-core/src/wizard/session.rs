//! Wizard session state machine.
//!
//! Owns the in-memory profile being edited and the current step. Every field
//! edit writes the full updated profile through to the device cache, so the
//! cache is always current with unsaved in-memory state; the authoritative
//! store is only touched on an explicit save.

use super::step::WizardStep;
use crate::cache::DeviceCache;
use crate::error::{BriefError, Result};
use crate::identity::UserIdentity;
use crate::profile::model::Offer;
use crate::profile::store::ProfileStore;
use crate::profile::{Profile, is_filled};
use std::sync::Arc;
use uuid::Uuid;

/// The wizard caps offer additions; the data model itself is unbounded.
pub const MAX_OFFERS: usize = 5;

/// An editing session over one profile.
pub struct WizardSession {
    profile: Profile,
    step: WizardStep,
    cache: Arc<dyn DeviceCache>,
}

impl WizardSession {
    /// Starts a session on the given profile, at the first step.
    pub fn new(profile: Profile, cache: Arc<dyn DeviceCache>) -> Self {
        Self {
            profile,
            step: WizardStep::FIRST,
            cache,
        }
    }

    /// Starts a session from the device cache, falling back to the default
    /// profile when the cache is empty or unreadable.
    pub fn resume(cache: Arc<dyn DeviceCache>) -> Self {
        let profile = match cache.read() {
            Ok(Some(cached)) => cached.profile,
            Ok(None) => Profile::default(),
            Err(err) => {
                tracing::warn!("device cache unreadable, starting from defaults: {err}");
                Profile::default()
            }
        };
        Self::new(profile, cache)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Whether the current step's forward guard holds.
    ///
    /// Guards gate only sequential advancement; `jump` ignores them.
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Basics => {
                is_filled(&self.profile.business_name)
                    && is_filled(&self.profile.short_description)
                    && is_filled(&self.profile.industry)
            }
            WizardStep::Offerings => true,
            WizardStep::AudienceVoice => {
                is_filled(&self.profile.target_audience)
                    && is_filled(&self.profile.main_pain_points)
                    && is_filled(&self.profile.dream_outcome)
            }
            WizardStep::Policies => true,
        }
    }

    /// Advances to the next step if the current guard holds.
    ///
    /// At the last step this is a no-op returning the current step.
    pub fn advance(&mut self) -> Result<WizardStep> {
        if !self.can_advance() {
            return Err(BriefError::validation(guard_message(self.step)));
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Moves back one step; always permitted while not on the first step.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Jumps directly to an arbitrary step, ignoring guards.
    pub fn jump(&mut self, step: WizardStep) {
        self.step = step;
    }

    /// Applies a field edit and immediately writes the full profile through
    /// to the device cache.
    pub fn edit(&mut self, apply: impl FnOnce(&mut Profile)) {
        apply(&mut self.profile);
        self.write_through();
    }

    /// Adds a blank offer and returns its id.
    ///
    /// Ids are freshly generated UUIDs: unique within the profile, stable
    /// across edits, and never reused after a removal.
    pub fn add_offer(&mut self) -> Result<String> {
        if self.profile.offers.len() >= MAX_OFFERS {
            return Err(BriefError::validation(format!(
                "A profile holds at most {MAX_OFFERS} offers"
            )));
        }
        let offer = Offer {
            id: Uuid::new_v4().to_string(),
            ..Offer::default()
        };
        let id = offer.id.clone();
        self.profile.offers.push(offer);
        self.write_through();
        Ok(id)
    }

    /// Edits the offer with the given id.
    pub fn edit_offer(&mut self, id: &str, apply: impl FnOnce(&mut Offer)) -> Result<()> {
        let offer = self
            .profile
            .offers
            .iter_mut()
            .find(|offer| offer.id == id)
            .ok_or_else(|| BriefError::validation(format!("No offer with id '{id}'")))?;
        apply(offer);
        self.write_through();
        Ok(())
    }

    /// Removes the offer with the given id. The freed id is never handed out
    /// again in this session.
    pub fn remove_offer(&mut self, id: &str) -> Result<()> {
        let before = self.profile.offers.len();
        self.profile.offers.retain(|offer| offer.id != id);
        if self.profile.offers.len() == before {
            return Err(BriefError::validation(format!("No offer with id '{id}'")));
        }
        self.write_through();
        Ok(())
    }

    /// Submits the full in-memory profile to the store, independent of the
    /// current step.
    ///
    /// A failed save leaves both the in-memory profile and the device cache
    /// intact; the caller surfaces the error and the user may retry.
    pub async fn save(&self, store: &dyn ProfileStore, user: &UserIdentity) -> Result<Profile> {
        store.upsert(&user.id, &self.profile).await
    }

    /// Write-through to the device cache; failures are non-fatal.
    fn write_through(&self) {
        if let Err(err) = self.cache.write(&self.profile) {
            tracing::warn!("device cache write failed, continuing: {err}");
        }
    }
}

fn guard_message(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Basics => {
            "Business name, short description and industry are required before continuing"
        }
        WizardStep::AudienceVoice => {
            "Target audience, main pain points and dream outcome are required before continuing"
        }
        WizardStep::Offerings | WizardStep::Policies => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedProfile;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory device cache for tests.
    #[derive(Default)]
    struct MemoryCache {
        snapshot: Mutex<Option<Profile>>,
        fail_writes: bool,
    }

    impl DeviceCache for MemoryCache {
        fn read(&self) -> Result<Option<CachedProfile>> {
            Ok(self
                .snapshot
                .lock()
                .unwrap()
                .clone()
                .map(CachedProfile::now))
        }

        fn write(&self, profile: &Profile) -> Result<()> {
            if self.fail_writes {
                return Err(BriefError::cache("disk full"));
            }
            *self.snapshot.lock().unwrap() = Some(profile.clone());
            Ok(())
        }
    }

    /// In-memory profile store for tests.
    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<String, Profile>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl ProfileStore for MemoryStore {
        async fn find_by_user(&self, user_id: &str) -> Result<Option<Profile>> {
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

    fn session() -> WizardSession {
        WizardSession::new(Profile::default(), Arc::new(MemoryCache::default()))
    }

    #[test]
    fn test_basics_guard_rejects_blank_business_name() {
        let mut session = session();
        session.edit(|p| {
            p.short_description = "desc".to_string();
            p.industry = "retail".to_string();
        });
        assert!(!session.can_advance());
        assert!(session.advance().is_err());
        assert_eq!(session.step(), WizardStep::Basics);

        session.edit(|p| p.business_name = "Acme".to_string());
        assert!(session.can_advance());
        assert_eq!(session.advance().unwrap(), WizardStep::Offerings);
    }

    #[test]
    fn test_offerings_and_policies_steps_are_optional() {
        let mut session = session();
        session.jump(WizardStep::Offerings);
        assert!(session.can_advance());
        session.jump(WizardStep::Policies);
        assert!(session.can_advance());
    }

    #[test]
    fn test_audience_guard() {
        let mut session = session();
        session.jump(WizardStep::AudienceVoice);
        assert!(session.advance().is_err());

        session.edit(|p| {
            p.target_audience = "young professionals".to_string();
            p.main_pain_points = "no time".to_string();
            p.dream_outcome = "effortless style".to_string();
        });
        assert_eq!(session.advance().unwrap(), WizardStep::Policies);
    }

    #[test]
    fn test_back_is_always_permitted() {
        let mut session = session();
        assert_eq!(session.back(), WizardStep::Basics); // already at the first step
        session.jump(WizardStep::Policies);
        assert_eq!(session.back(), WizardStep::AudienceVoice);
    }

    #[test]
    fn test_jump_ignores_guards() {
        let mut session = session();
        session.jump(WizardStep::Policies);
        assert_eq!(session.step(), WizardStep::Policies);
    }

    #[test]
    fn test_advance_at_last_step_stays_put() {
        let mut session = session();
        session.jump(WizardStep::Policies);
        assert_eq!(session.advance().unwrap(), WizardStep::Policies);
    }

    #[test]
    fn test_edits_write_through_to_cache() {
        let cache = Arc::new(MemoryCache::default());
        let mut session = WizardSession::new(Profile::default(), cache.clone());

        session.edit(|p| p.business_name = "Acme".to_string());

        let cached = cache.read().unwrap().unwrap();
        assert_eq!(cached.profile.business_name, "Acme");
    }

    #[test]
    fn test_cache_failure_is_swallowed() {
        let cache = Arc::new(MemoryCache {
            fail_writes: true,
            ..MemoryCache::default()
        });
        let mut session = WizardSession::new(Profile::default(), cache);

        // Must not panic or error; the in-memory edit still lands.
        session.edit(|p| p.business_name = "Acme".to_string());
        assert_eq!(session.profile().business_name, "Acme");
    }

    #[test]
    fn test_offer_ids_are_never_reused() {
        let mut session = session();
        let first = session.add_offer().unwrap();
        session.remove_offer(&first).unwrap();
        let second = session.add_offer().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_offer_cap() {
        let mut session = session();
        for _ in 0..MAX_OFFERS {
            session.add_offer().unwrap();
        }
        assert!(session.add_offer().is_err());

        // Removing one frees a slot again.
        let id = session.profile().offers[0].id.clone();
        session.remove_offer(&id).unwrap();
        assert!(session.add_offer().is_ok());
    }

    #[test]
    fn test_edit_offer_by_id() {
        let mut session = session();
        let id = session.add_offer().unwrap();
        session
            .edit_offer(&id, |offer| offer.name = "Widget".to_string())
            .unwrap();
        assert_eq!(session.profile().offers[0].name, "Widget");

        assert!(session.edit_offer("missing", |_| {}).is_err());
        assert!(session.remove_offer("missing").is_err());
    }

    #[test]
    fn test_resume_prefers_cached_snapshot() {
        let cache = Arc::new(MemoryCache::default());
        let mut seeded = Profile::default();
        seeded.business_name = "Cached Co".to_string();
        cache.write(&seeded).unwrap();

        let session = WizardSession::resume(cache);
        assert_eq!(session.profile().business_name, "Cached Co");
        assert_eq!(session.step(), WizardStep::Basics);
    }

    #[tokio::test]
    async fn test_save_submits_whole_profile_regardless_of_step() {
        let store = MemoryStore::default();
        let user = UserIdentity::new("user-1");
        let mut session = session();
        session.edit(|p| p.business_name = "Acme".to_string());
        session.jump(WizardStep::AudienceVoice);

        let saved = session.save(&store, &user).await.unwrap();
        assert_eq!(saved.business_name, "Acme");
        assert_eq!(
            store
                .find_by_user("user-1")
                .await
                .unwrap()
                .unwrap()
                .business_name,
            "Acme"
        );
    }

    #[tokio::test]
    async fn test_failed_save_keeps_cache_and_memory_intact() {
        let cache = Arc::new(MemoryCache::default());
        let store = MemoryStore {
            fail: true,
            ..MemoryStore::default()
        };
        let user = UserIdentity::new("user-1");
        let mut session = WizardSession::new(Profile::default(), cache.clone());
        session.edit(|p| p.business_name = "Acme".to_string());

        let err = session.save(&store, &user).await.unwrap_err();
        assert!(err.is_store());
        assert_eq!(session.profile().business_name, "Acme");
        assert_eq!(
            cache.read().unwrap().unwrap().profile.business_name,
            "Acme"
        );
    }
}
