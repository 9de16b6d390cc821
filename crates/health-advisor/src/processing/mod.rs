//! Advice turn processing: archive, extract and generate for one request

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::generation::advisor::truncate;
use crate::generation::AdviceGenerator;
use crate::ingestion::DocumentExtractor;
use crate::providers::{destination_path, ArchiveProvider, LlmProvider};
use crate::types::{AdviceResult, Attachment};

/// Prefix for extraction failures handed to the model as supporting text
pub const EXTRACTION_FAILURE_PREFIX: &str = "Error processing PDF: ";

/// Orchestrates one advice turn
///
/// Holds only shared, immutable provider handles; one processor serves all
/// concurrent requests.
#[derive(Clone)]
pub struct AdviceProcessor {
    generator: AdviceGenerator,
    archive: Arc<dyn ArchiveProvider>,
    extractor: Arc<dyn DocumentExtractor>,
    archive_folder: String,
    forward_extraction_errors: bool,
}

impl AdviceProcessor {
    /// Create a processor archiving reports under `archive_folder`
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        archive: Arc<dyn ArchiveProvider>,
        extractor: Arc<dyn DocumentExtractor>,
        archive_folder: impl Into<String>,
    ) -> Self {
        Self {
            generator: AdviceGenerator::new(llm),
            archive,
            extractor,
            archive_folder: archive_folder.into(),
            forward_extraction_errors: true,
        }
    }

    /// Whether extraction failures are passed to the model as text (default: true)
    pub fn with_forward_extraction_errors(mut self, forward: bool) -> Self {
        self.forward_extraction_errors = forward;
        self
    }

    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        self.generator.provider()
    }

    pub fn archive(&self) -> &Arc<dyn ArchiveProvider> {
        &self.archive
    }

    /// Handle one turn; never fails, every failure becomes an error envelope
    pub async fn handle(&self, query: &str, file: Option<Attachment>) -> AdviceResult {
        tracing::info!("Received query: {}", truncate(query, 100));

        match self.process(query, file).await {
            Ok(response) => {
                tracing::info!("Response generated ({} chars)", response.len());
                AdviceResult::success(response)
            }
            Err(e) => {
                tracing::error!("Advice request failed: {}", e);
                AdviceResult::error(format!("Error: {}", e))
            }
        }
    }

    async fn process(&self, query: &str, file: Option<Attachment>) -> Result<String> {
        let supporting_text = match file.filter(|f| !f.filename().is_empty()) {
            Some(attachment) if self.extractor.supports(attachment.filename()) => {
                tracing::info!(
                    "Processing file: {} ({} bytes)",
                    attachment.filename(),
                    attachment.data().len()
                );
                self.ingest(&attachment).await
            }
            Some(attachment) => {
                tracing::info!("Unsupported file type: {}", attachment.filename());
                None
            }
            None => None,
        };

        self.generator
            .generate(query, supporting_text.as_deref())
            .await
    }

    /// Archive and extract concurrently; neither failure ends the turn
    async fn ingest(&self, attachment: &Attachment) -> Option<String> {
        let (_, extracted) = tokio::join!(
            self.archive_copy(attachment),
            self.extract_text(attachment)
        );

        match extracted {
            Ok(text) => {
                tracing::info!("Extracted {} characters from PDF", text.chars().count());
                Some(text)
            }
            Err(e) => {
                tracing::warn!("Error processing PDF {}: {}", attachment.filename(), e);
                self.forward_extraction_errors
                    .then(|| format!("{}{}", EXTRACTION_FAILURE_PREFIX, e))
            }
        }
    }

    async fn archive_copy(&self, attachment: &Attachment) {
        let destination = match destination_path(&self.archive_folder, attachment.filename()) {
            Ok(destination) => destination,
            Err(e) => {
                tracing::warn!("Skipping archive: {}", e);
                return;
            }
        };

        match self
            .archive
            .archive(attachment.data().clone(), &destination)
            .await
        {
            Ok(()) => tracing::info!("Archived report to {} ({})", destination, self.archive.name()),
            Err(e) => tracing::warn!("Failed to archive {}: {}", destination, e),
        }
    }

    async fn extract_text(&self, attachment: &Attachment) -> Result<String> {
        let extractor = self.extractor.clone();
        let data = attachment.data().clone();

        tokio::task::spawn_blocking(move || extractor.extract(&data))
            .await
            .map_err(|e| Error::internal(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GUIDANCE_MESSAGE;
    use crate::providers::UnavailableArchive;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoLlm {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LlmProvider for EchoLlm {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("advice".to_string())
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }
    }

    struct FailingExtractor;

    impl DocumentExtractor for FailingExtractor {
        fn name(&self) -> &str {
            "failing"
        }

        fn supports(&self, filename: &str) -> bool {
            filename.ends_with(".pdf")
        }

        fn extract(&self, _data: &[u8]) -> Result<String> {
            Err(Error::extraction("Invalid file header"))
        }
    }

    fn processor(llm: Arc<EchoLlm>) -> AdviceProcessor {
        AdviceProcessor::new(
            llm,
            Arc::new(UnavailableArchive::new("test")),
            Arc::new(FailingExtractor),
            "/health_records",
        )
    }

    #[tokio::test]
    async fn test_extraction_failure_is_forwarded_by_default() {
        let llm = Arc::new(EchoLlm::default());
        let result = processor(llm.clone())
            .handle("Explain my labs", Some(Attachment::new("corrupt.pdf", b"junk".to_vec())))
            .await;

        assert_eq!(result, AdviceResult::success("advice"));
        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("Error processing PDF: Invalid file header"));
    }

    #[tokio::test]
    async fn test_extraction_failure_dropped_when_not_forwarded() {
        let llm = Arc::new(EchoLlm::default());
        let result = processor(llm.clone())
            .with_forward_extraction_errors(false)
            .handle("Explain my labs", Some(Attachment::new("corrupt.pdf", b"junk".to_vec())))
            .await;

        assert!(result.is_success());
        let prompts = llm.prompts.lock().unwrap();
        assert!(!prompts[0].contains("Error processing PDF"));
        assert!(!prompts[0].contains("Additional information"));
    }

    #[tokio::test]
    async fn test_empty_filename_is_no_file() {
        let llm = Arc::new(EchoLlm::default());
        let result = processor(llm.clone())
            .handle("Explain my labs", Some(Attachment::new("", b"junk".to_vec())))
            .await;

        assert!(result.is_success());
        assert!(!llm.prompts.lock().unwrap()[0].contains("Additional information"));
    }

    #[tokio::test]
    async fn test_blank_query_with_file_returns_guidance() {
        let llm = Arc::new(EchoLlm::default());
        let result = processor(llm.clone())
            .handle("  ", Some(Attachment::new("corrupt.pdf", b"junk".to_vec())))
            .await;

        assert_eq!(result, AdviceResult::success(GUIDANCE_MESSAGE));
        assert!(llm.prompts.lock().unwrap().is_empty());
    }
}
