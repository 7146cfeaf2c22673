//! Generation backend selection.

use brandbrief_core::generation::TextGenerator;
use brandbrief_interaction::{OpenAiGenerator, PlaceholderGenerator};
use std::sync::Arc;

/// Picks the configured OpenAI backend, or the placeholder when no
/// credentials are available.
pub fn build_generator(model: Option<&str>) -> Arc<dyn TextGenerator> {
    match OpenAiGenerator::try_from_env() {
        Ok(generator) => {
            let generator = match model {
                Some(model) => generator.with_model(model),
                None => generator,
            };
            Arc::new(generator)
        }
        Err(err) => {
            tracing::warn!("no generation credentials ({err}); using the placeholder backend");
            Arc::new(PlaceholderGenerator)
        }
    }
}
