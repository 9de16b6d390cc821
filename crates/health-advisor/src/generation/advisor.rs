//! Advice generator: validation, prompting and fallbacks around the model

use std::sync::Arc;

use super::prompt::PromptBuilder;
use crate::error::Result;
use crate::providers::LlmProvider;

/// Returned for an empty or whitespace-only query without calling the model
pub const GUIDANCE_MESSAGE: &str = "Please provide a valid health-related question.";

/// Returned when the model produced no usable text
pub const FALLBACK_MESSAGE: &str =
    "I'm sorry, I couldn't generate a response. Please try again with a different query.";

/// Generates advice text for a query and optional report text
#[derive(Clone)]
pub struct AdviceGenerator {
    llm: Arc<dyn LlmProvider>,
}

impl AdviceGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Underlying model provider
    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.llm
    }

    /// Generate advice
    ///
    /// A blank query yields [`GUIDANCE_MESSAGE`] and an empty model answer
    /// yields [`FALLBACK_MESSAGE`]; both are successes. Model failures are
    /// returned as `Error::Generation`.
    pub async fn generate(&self, query: &str, supporting_text: Option<&str>) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("Blank query, returning guidance");
            return Ok(GUIDANCE_MESSAGE.to_string());
        }

        let prompt = PromptBuilder::build(query, supporting_text);
        tracing::info!(
            "Generating advice with {} ({}), query: {}",
            self.llm.name(),
            self.llm.model(),
            truncate(query, 100)
        );

        let text = self.llm.generate(&prompt).await?;

        if text.trim().is_empty() {
            tracing::warn!("Model returned an empty response");
            return Ok(FALLBACK_MESSAGE.to_string());
        }

        tracing::info!("Received {} characters from model", text.len());
        Ok(text)
    }
}

/// Truncate to at most `max` characters for log lines
pub(crate) fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
