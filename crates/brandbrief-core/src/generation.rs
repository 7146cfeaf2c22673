//! Generation backend trait.
//!
//! The generation model is a black box to this crate: it takes one finished
//! prompt and returns text, or fails with a `Generation` error.

use crate::error::Result;

/// An abstract text-generation backend.
///
/// Implementations perform the only network call in the generation path and
/// should bound it with a timeout; callers never retry automatically — the
/// user re-triggers the action.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for a finished prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
