//! Local filesystem archive

use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;

use super::archive::ArchiveProvider;
use crate::error::{Error, Result};

/// Archives reports under a local root directory
///
/// The logical destination `/health_records/labs.pdf` maps to
/// `<root>/health_records/labs.pdf`.
#[derive(Debug, Clone)]
pub struct LocalArchiver {
    root: PathBuf,
}

impl LocalArchiver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Filesystem path for a logical destination
    pub fn resolve(&self, destination: &str) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for segment in destination.split('/').filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." {
                return Err(Error::archive(format!(
                    "Invalid destination '{}'",
                    destination
                )));
            }
            path.push(segment);
        }
        if path == self.root {
            return Err(Error::archive("Empty archive destination"));
        }
        Ok(path)
    }
}

#[async_trait]
impl ArchiveProvider for LocalArchiver {
    async fn archive(&self, data: Bytes, destination: &str) -> Result<()> {
        let path = self.resolve(destination)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::archive(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| Error::archive(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::debug!("Archived {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "local"
    }
}
