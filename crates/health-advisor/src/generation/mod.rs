//! Advice generation: prompt construction and model invocation

pub mod advisor;
pub mod prompt;

pub use advisor::{AdviceGenerator, FALLBACK_MESSAGE, GUIDANCE_MESSAGE};
pub use prompt::PromptBuilder;
