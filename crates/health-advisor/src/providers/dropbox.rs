//! Dropbox archive via the Dropbox HTTP API

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::json;
use std::time::Duration;

use super::archive::ArchiveProvider;
use crate::config::ArchiveConfig;
use crate::error::{Error, Result};

/// Dropbox archiver authenticated with an access token
pub struct DropboxArchiver {
    http: reqwest::Client,
    token: String,
    api_url: String,
    content_url: String,
}

impl DropboxArchiver {
    /// Create a new archiver without contacting Dropbox
    pub fn new(token: impl Into<String>, config: &ArchiveConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            token: token.into(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            content_url: config.content_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create an archiver and verify the token against the account endpoint
    pub async fn connect(token: impl Into<String>, config: &ArchiveConfig) -> Result<Self> {
        let archiver = Self::new(token, config)?;
        archiver.verify().await?;
        Ok(archiver)
    }

    /// Check that the token is accepted
    pub async fn verify(&self) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/2/users/get_current_account", self.api_url))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::archive(format!("Dropbox account check failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::archive(format!(
                "Dropbox rejected the access token ({}): {}",
                status, body
            )));
        }

        Ok(())
    }
}

/// Serialize JSON with every non-ASCII character escaped as `\uXXXX`
///
/// `Dropbox-API-Arg` travels in an HTTP header, which only carries visible
/// ASCII.
fn header_safe_json(value: &serde_json::Value) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii() && c != '\u{7f}' {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}

#[async_trait]
impl ArchiveProvider for DropboxArchiver {
    async fn archive(&self, data: Bytes, destination: &str) -> Result<()> {
        let arg = header_safe_json(&json!({
            "path": destination,
            "mode": "overwrite",
            "mute": true,
        }));
        let arg = HeaderValue::from_str(&arg)
            .map_err(|e| Error::archive(format!("Invalid Dropbox-API-Arg header: {}", e)))?;

        let size = data.len();
        let response = self
            .http
            .post(format!("{}/2/files/upload", self.content_url))
            .bearer_auth(&self.token)
            .header("Dropbox-API-Arg", arg)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await
            .map_err(|e| Error::archive(format!("Dropbox upload failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::archive(format!(
                "Dropbox upload failed ({}): {}",
                status, body
            )));
        }

        tracing::debug!("Uploaded {} bytes to Dropbox at {}", size, destination);
        Ok(())
    }

    fn name(&self) -> &str {
        "dropbox"
    }
}
