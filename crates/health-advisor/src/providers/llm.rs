//! LLM provider trait for generating advice text

use async_trait::async_trait;

use crate::error::Result;

/// Trait for single-shot text generation
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language API
/// - `UnavailableModel`: no credential at startup; every call fails
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for a complete prompt
    ///
    /// An empty string means the model produced no usable output; callers
    /// decide how to present that. Transport, auth and quota failures are
    /// returned as `Error::Generation`.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Whether a credential was established at startup
    fn is_available(&self) -> bool {
        true
    }

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
