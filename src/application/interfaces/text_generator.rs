use async_trait::async_trait;

use crate::domain::GenerationFailure;

/// Sends a single prompt, framed as one user turn, to a hosted text
/// generation model and returns the generated text.
///
/// Implementors own transport, credentials and vendor-specific payloads, and
/// classify every failure into a [`GenerationFailure`] cause.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationFailure>;

    /// Get the model identifier used for generation
    fn model_name(&self) -> &str;
}
