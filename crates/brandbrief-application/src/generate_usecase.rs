//! Generation use case.
//!
//! One module invocation end to end: resolve the user, look up the module
//! handler, read the profile (device cache first, store second), gate on a
//! usable profile, compile, assemble the prompt, and call the generation
//! backend.

use brandbrief_core::cache::DeviceCache;
use brandbrief_core::error::{BriefError, Result};
use brandbrief_core::generation::TextGenerator;
use brandbrief_core::identity::{IdentityResolver, UserIdentity};
use brandbrief_core::module::ModuleRegistry;
use brandbrief_core::profile::{Profile, ProfileStore, compile, completion};
use serde_json::Value;
use std::sync::Arc;

const NO_PROFILE_MESSAGE: &str =
    "No profile found. Please complete your business profile first.";

/// Use case for running one content-generation module.
pub struct GenerateUseCase {
    identity: Arc<dyn IdentityResolver>,
    store: Arc<dyn ProfileStore>,
    cache: Option<Arc<dyn DeviceCache>>,
    generator: Arc<dyn TextGenerator>,
}

impl GenerateUseCase {
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        store: Arc<dyn ProfileStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            identity,
            store,
            cache: None,
            generator,
        }
    }

    /// Attaches a device cache tier, read before the store.
    pub fn with_cache(mut self, cache: Arc<dyn DeviceCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Runs the module and returns the generated text.
    ///
    /// Unauthorized and validation failures (absent or unknown module,
    /// missing input, unusable profile) are terminal and returned
    /// immediately; generation failures surface to the caller and are never
    /// retried here.
    pub async fn generate(
        &self,
        bearer_token: Option<&str>,
        module_id: Option<&str>,
        input: &Value,
    ) -> Result<String> {
        let user = self
            .identity
            .current_user(bearer_token)
            .await
            .ok_or(BriefError::Unauthorized)?;

        let module_id = module_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BriefError::missing_field("moduleId"))?;
        let module = ModuleRegistry::global().get(module_id)?;

        let profile = self
            .resolve_profile(&user)
            .await?
            .ok_or_else(|| BriefError::validation(NO_PROFILE_MESSAGE))?;

        // A profile with no signal at all is as good as missing.
        if !completion(&profile).is_usable() {
            return Err(BriefError::validation(NO_PROFILE_MESSAGE));
        }

        let profile_text = compile(&profile);
        let prompt = module.build_prompt(&profile_text, input)?;

        tracing::debug!(
            module_id,
            prompt_chars = prompt.len(),
            "dispatching generation"
        );
        self.generator.generate(&prompt).await
    }

    /// Device cache first, store second.
    async fn resolve_profile(&self, user: &UserIdentity) -> Result<Option<Profile>> {
        if let Some(cache) = &self.cache {
            match cache.read() {
                Ok(Some(cached)) => return Ok(Some(cached.profile)),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!("device cache read failed, falling back to store: {err}");
                }
            }
        }
        self.store.find_by_user(&user.id).await
    }
}
