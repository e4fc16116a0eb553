//! Generative provider trait definition

use crate::request::{GenerateOptions, PromptSpec};
use crate::Result;
use async_trait::async_trait;

/// Trait for remote generative-model providers
///
/// Implementations turn a prompt (plus optional attachments) and call
/// options into the model's raw text output. The gateway applies the
/// retry policy on top; implementations perform a single attempt.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Generate raw model text for a prompt
    ///
    /// # Arguments
    ///
    /// * `spec` - Prompt text and ordered attachments
    /// * `options` - Grounding / strict-JSON / thinking-budget flags
    ///
    /// # Returns
    ///
    /// The model's text output, possibly a fenced JSON block
    async fn generate(&self, spec: &PromptSpec, options: &GenerateOptions) -> Result<String>;

    /// Get the provider name (e.g. "gemini")
    fn name(&self) -> &str;
}
