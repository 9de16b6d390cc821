//! Shared fixtures for endpoint tests: recording providers and PDF builders

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use health_advisor::{
    config::AdvisorConfig,
    error::{Error, Result},
    ingestion::{DocumentExtractor, PdfExtractor},
    providers::{ArchiveProvider, LlmProvider},
    server::{state::AppState, AdvisorServer},
    AdviceProcessor,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[path = "../../src/ingestion/fixtures.rs"]
mod fixtures;

pub use fixtures::pdf_with_pages;

/// Model stub returning a fixed reply and recording every prompt
pub struct RecordingLlm {
    reply: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingLlm {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for RecordingLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(Error::generation(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "recording"
    }

    fn model(&self) -> &str {
        "recording-1"
    }
}

/// Archive stub recording destinations, optionally failing every call
pub struct RecordingArchive {
    fail: bool,
    calls: Mutex<Vec<(String, Bytes)>>,
}

impl RecordingArchive {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Bytes)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArchiveProvider for RecordingArchive {
    async fn archive(&self, data: Bytes, destination: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((destination.to_string(), data));
        if self.fail {
            Err(Error::archive("quota exceeded"))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// PDF extractor that counts invocations
#[derive(Default)]
pub struct CountingExtractor {
    inner: PdfExtractor,
    calls: AtomicUsize,
}

impl CountingExtractor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentExtractor for CountingExtractor {
    fn name(&self) -> &str {
        "counting"
    }

    fn supports(&self, filename: &str) -> bool {
        self.inner.supports(filename)
    }

    fn extract(&self, data: &[u8]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.extract(data)
    }
}

/// Build a test server over the given providers
pub fn test_server(
    llm: Arc<dyn LlmProvider>,
    archive: Arc<dyn ArchiveProvider>,
    extractor: Arc<dyn DocumentExtractor>,
) -> TestServer {
    let config = AdvisorConfig::default();
    let processor = AdviceProcessor::new(llm, archive, extractor, config.archive.folder.clone());
    let state = AppState::from_parts(config, processor);
    TestServer::new(AdvisorServer::with_state(state).router()).unwrap()
}
