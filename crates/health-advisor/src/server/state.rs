//! Application state for the advice server

use std::sync::Arc;

use crate::config::{AdvisorConfig, ArchiveBackend};
use crate::error::Result;
use crate::ingestion::PdfExtractor;
use crate::processing::AdviceProcessor;
use crate::providers::{
    ArchiveProvider, DropboxArchiver, GeminiClient, LlmProvider, LocalArchiver,
    UnavailableArchive, UnavailableModel,
};

/// Shared application state
///
/// Built once at startup and cloned into every handler. Holds no mutable
/// state; provider availability is fixed for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AdvisorConfig,
    /// Turn orchestration over the configured providers
    processor: AdviceProcessor,
}

impl AppState {
    /// Create application state, establishing provider credentials
    pub async fn new(config: AdvisorConfig) -> Result<Self> {
        tracing::info!(
            "Initializing health advisor state (archive backend: {:?})...",
            config.archive.backend
        );

        let llm = Self::init_llm(&config)?;
        let archive = Self::init_archive(&config).await?;

        let processor = AdviceProcessor::new(
            llm,
            archive,
            Arc::new(PdfExtractor::new()),
            config.archive.folder.clone(),
        )
        .with_forward_extraction_errors(config.processing.forward_extraction_errors);

        Ok(Self::from_parts(config, processor))
    }

    /// Create state around an already-built processor
    pub fn from_parts(config: AdvisorConfig, processor: AdviceProcessor) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, processor }),
        }
    }

    fn init_llm(config: &AdvisorConfig) -> Result<Arc<dyn LlmProvider>> {
        match config.llm.api_key.as_deref() {
            Some(key) => {
                tracing::info!("Gemini model configured: {}", config.llm.model);
                Ok(Arc::new(GeminiClient::new(key, &config.llm)?))
            }
            None => {
                tracing::warn!(
                    "GEMINI_API_KEY not set; every advice request will return an error"
                );
                Ok(Arc::new(UnavailableModel::new(
                    config.llm.model.clone(),
                    "GEMINI_API_KEY not set",
                )))
            }
        }
    }

    async fn init_archive(config: &AdvisorConfig) -> Result<Arc<dyn ArchiveProvider>> {
        match config.archive.backend {
            ArchiveBackend::Local => {
                tracing::info!(
                    "Archiving reports locally under {}",
                    config.archive.local_root.display()
                );
                Ok(Arc::new(LocalArchiver::new(config.archive.local_root.clone())))
            }
            ArchiveBackend::Dropbox => match config.archive.access_token.as_deref() {
                Some(token) => match DropboxArchiver::connect(token, &config.archive).await {
                    Ok(archiver) => {
                        tracing::info!("Dropbox archive connected");
                        Ok(Arc::new(archiver))
                    }
                    Err(e) => {
                        tracing::warn!("Error initializing Dropbox, archiving disabled: {}", e);
                        Ok(Arc::new(UnavailableArchive::new(e.to_string())))
                    }
                },
                None => {
                    tracing::warn!("DROPBOX_ACCESS_TOKEN not set; archiving disabled");
                    Ok(Arc::new(UnavailableArchive::new(
                        "DROPBOX_ACCESS_TOKEN not set",
                    )))
                }
            },
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AdvisorConfig {
        &self.inner.config
    }

    /// Get the turn processor
    pub fn processor(&self) -> &AdviceProcessor {
        &self.inner.processor
    }

    /// Ready when the model provider has a credential
    pub fn is_ready(&self) -> bool {
        self.inner.processor.llm().is_available()
    }
}
