//! Placeholder generation backend.
//!
//! Returns fixed text instead of calling a model. Used when no API key is
//! configured and by tests that exercise the generation path end to end.

use brandbrief_core::error::Result;
use brandbrief_core::generation::TextGenerator;

const PLACEHOLDER_TEXT: &str =
    "This is a placeholder response. Configure an OpenAI API key to generate real content.";

/// A generator that never leaves the process.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderGenerator;

#[async_trait::async_trait]
impl TextGenerator for PlaceholderGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let preview: String = prompt.chars().take(200).collect();
        tracing::debug!("placeholder generation for prompt: {preview}");
        Ok(PLACEHOLDER_TEXT.to_string())
    }
}
