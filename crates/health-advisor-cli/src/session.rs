//! Chat session: ordered message history plus the selected report

use health_advisor::{AdviceResult, Attachment, Message};
use std::path::Path;

use crate::client::AdviceClient;

/// How a turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The server produced advice (or guidance/fallback text)
    Answered,
    /// The server reported an application error
    Failed,
    /// No envelope was received
    ConnectionFailed,
}

/// One user's chat session
///
/// History is append-only and lives only as long as the session. A selected
/// report stays attached to every following turn until detached.
pub struct ChatSession {
    client: AdviceClient,
    history: Vec<Message>,
    attachment: Option<Attachment>,
}

impl ChatSession {
    pub fn new(client: AdviceClient) -> Self {
        Self {
            client,
            history: Vec::new(),
            attachment: None,
        }
    }

    pub fn client(&self) -> &AdviceClient {
        &self.client
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// The most recent message, normally the reply to the last turn
    pub fn last_message(&self) -> Option<&Message> {
        self.history.last()
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Select a PDF report for the following turns
    ///
    /// Only names ending in a lowercase `.pdf` are accepted, matching what the
    /// server treats as an eligible report.
    pub async fn attach(&mut self, path: &Path) -> anyhow::Result<&Attachment> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow::anyhow!("Not a file: {}", path.display()))?;

        if !filename.ends_with(".pdf") {
            anyhow::bail!("Only PDF reports are supported: {}", filename);
        }

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

        tracing::debug!("Attached {} ({} bytes)", filename, data.len());
        Ok(&*self.attachment.insert(Attachment::new(filename, data)))
    }

    /// Clear the selected report, returning it
    pub fn detach(&mut self) -> Option<Attachment> {
        self.attachment.take()
    }

    /// Run one turn
    ///
    /// Appends the user message, waits for the single outstanding request
    /// and appends the assistant reply. Holding `&mut self` for the whole
    /// call keeps one request in flight per session.
    pub async fn send(&mut self, query: &str) -> TurnOutcome {
        self.history.push(Message::user(query));

        let (outcome, content) = match self.client.ask(query, self.attachment.as_ref()).await {
            Ok(AdviceResult::Success { response }) => (TurnOutcome::Answered, response),
            Ok(AdviceResult::Error { message }) => {
                (TurnOutcome::Failed, format!("Error: {}", message))
            }
            Err(e) => {
                tracing::warn!("Request to {} failed: {}", self.client.endpoint(), e);
                (TurnOutcome::ConnectionFailed, format!("Connection error: {}", e))
            }
        };

        self.history.push(Message::assistant(content));
        outcome
    }
}
