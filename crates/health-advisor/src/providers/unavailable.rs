//! Providers standing in for backends without a startup credential

use async_trait::async_trait;
use bytes::Bytes;

use super::archive::ArchiveProvider;
use super::llm::LlmProvider;
use crate::error::{Error, Result};

/// Model provider used when no API key was configured
///
/// Every call fails immediately without network I/O.
#[derive(Debug, Clone)]
pub struct UnavailableModel {
    model: String,
    reason: String,
}

impl UnavailableModel {
    pub fn new(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for UnavailableModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(Error::generation(format!(
            "model not configured ({})",
            self.reason
        )))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "unavailable"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Archive provider used when the store credential is missing or was rejected
///
/// Every call fails immediately without network I/O.
#[derive(Debug, Clone)]
pub struct UnavailableArchive {
    reason: String,
}

impl UnavailableArchive {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ArchiveProvider for UnavailableArchive {
    async fn archive(&self, _data: Bytes, destination: &str) -> Result<()> {
        Err(Error::archive(format!(
            "archive not configured, skipped {} ({})",
            destination, self.reason
        )))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
