//! HTTP client for the advice endpoint

use health_advisor::{AdviceResult, Attachment};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Default server address
pub const DEFAULT_URL: &str = "http://localhost:8000";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Failure to obtain a result envelope from the server
///
/// Distinct from an `error` envelope, which is a successful exchange that
/// carries an application failure.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No response within the client timeout
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Server could not be reached
    #[error("{0}")]
    Unreachable(String),

    /// Server answered with a non-success status
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not a result envelope
    #[error("invalid response body: {0}")]
    Decode(String),

    /// Request could not be built
    #[error("failed to build request: {0}")]
    Request(String),
}

/// Client for `POST /api/health-advice`
#[derive(Clone, Debug)]
pub struct AdviceClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl AdviceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}/api/health-advice", self.base_url)
    }

    /// Send one query with an optional attachment
    pub async fn ask(
        &self,
        query: &str,
        attachment: Option<&Attachment>,
    ) -> Result<AdviceResult, TransportError> {
        let mut form = Form::new().text("query", query.to_string());

        if let Some(attachment) = attachment {
            let part = Part::bytes(attachment.data().to_vec())
                .file_name(attachment.filename().to_string())
                .mime_str("application/pdf")
                .map_err(|e| TransportError::Request(e.to_string()))?;
            form = form.part("file", part);
        }

        tracing::debug!("POST {} ({} char query)", self.endpoint(), query.len());

        let response = self
            .http
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        tracing::debug!("Response status {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if error.is_decode() {
            TransportError::Decode(error.to_string())
        } else {
            TransportError::Unreachable(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let client = AdviceClient::new("http://localhost:8000/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.endpoint(), "http://localhost:8000/api/health-advice");
    }

    #[test]
    fn test_transport_error_messages() {
        assert_eq!(
            TransportError::Timeout(Duration::from_secs(60)).to_string(),
            "request timed out after 60s"
        );
        assert_eq!(
            TransportError::Status {
                status: 502,
                body: "bad gateway".to_string()
            }
            .to_string(),
            "server returned 502: bad gateway"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = AdviceClient::new("http://127.0.0.1:1", DEFAULT_TIMEOUT).unwrap();
        let err = client.ask("hello", None).await.unwrap_err();
        assert!(matches!(err, TransportError::Unreachable(_)));
    }
}
