//! Configuration for the health advisor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable pointing at an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "HEALTH_ADVISOR_CONFIG";

/// Main advisor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Generative model configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Report archive configuration
    #[serde(default)]
    pub archive: ArchiveConfig,
    /// Request processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,
}

impl AdvisorConfig {
    /// Load configuration: defaults, then an optional TOML file, then
    /// environment overrides.
    ///
    /// When `path` is `None` the file named by `HEALTH_ADVISOR_CONFIG` is used
    /// if that variable is set.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    /// Parse TOML text; missing sections fall back to defaults
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var("GEMINI_API_KEY").filter(|v| !v.trim().is_empty()) {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = var("GEMINI_MODEL").filter(|v| !v.trim().is_empty()) {
            self.llm.model = model;
        }
        if let Some(token) = var("DROPBOX_ACCESS_TOKEN").filter(|v| !v.trim().is_empty()) {
            self.archive.access_token = Some(token);
        }
        if let Some(backend) = var("HEALTH_ADVISOR_ARCHIVE_BACKEND") {
            match backend.to_lowercase().as_str() {
                "dropbox" => self.archive.backend = ArchiveBackend::Dropbox,
                "local" => self.archive.backend = ArchiveBackend::Local,
                other => tracing::warn!("Ignoring unknown archive backend '{}'", other),
            }
        }
        if let Some(host) = var("HEALTH_ADVISOR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("HEALTH_ADVISOR_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid HEALTH_ADVISOR_PORT '{}'", port),
            }
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable permissive CORS for browser front-ends
    pub enable_cors: bool,
    /// Maximum request body size in bytes (default: 20MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
            max_upload_size: 20 * 1024 * 1024,
        }
    }
}

/// Generative model (Gemini) configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key; the model is reported unavailable when absent
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Generative Language API base URL
    pub base_url: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token cap
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            temperature: 0.4,
            max_output_tokens: 2048,
            timeout_secs: 50,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Archive backend selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveBackend {
    /// Dropbox HTTP API
    #[default]
    Dropbox,
    /// Local filesystem directory
    Local,
}

/// Report archive configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Backend provider
    pub backend: ArchiveBackend,
    /// Dropbox access token; the archive is reported unavailable when absent
    pub access_token: Option<String>,
    /// Logical folder every report is archived under
    pub folder: String,
    /// Root directory for the local backend
    pub local_root: PathBuf,
    /// Dropbox RPC endpoint base (account check)
    pub api_url: String,
    /// Dropbox content endpoint base (uploads)
    pub content_url: String,
    /// Upload timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            backend: ArchiveBackend::Dropbox,
            access_token: None,
            folder: "/health_records".to_string(),
            local_root: PathBuf::from("./archive"),
            api_url: "https://api.dropboxapi.com".to_string(),
            content_url: "https://content.dropboxapi.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for ArchiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveConfig")
            .field("backend", &self.backend)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("folder", &self.folder)
            .field("local_root", &self.local_root)
            .field("api_url", &self.api_url)
            .field("content_url", &self.content_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Request processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Forward "Error processing PDF: ..." to the model as supporting text when
    /// extraction fails. When false the turn continues without supporting text.
    pub forward_extraction_errors: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            forward_extraction_errors: true,
        }
    }
}
