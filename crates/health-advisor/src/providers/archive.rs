//! Archive provider trait for storing uploaded reports

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{Error, Result};

/// Trait for best-effort report archiving
///
/// Writes to an existing destination overwrite it (last write wins).
/// Implementations:
/// - `DropboxArchiver`: Dropbox HTTP API
/// - `LocalArchiver`: filesystem directory
/// - `UnavailableArchive`: no credential at startup; every call fails
#[async_trait]
pub trait ArchiveProvider: Send + Sync {
    /// Store `data` at `destination`, a `/`-separated logical path
    async fn archive(&self, data: Bytes, destination: &str) -> Result<()>;

    /// Whether the backend was reachable with a valid credential at startup
    fn is_available(&self) -> bool {
        true
    }

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Build the archive destination for an uploaded file
///
/// Only the final path component of `filename` is kept, so a client cannot
/// place objects outside `folder`.
pub fn destination_path(folder: &str, filename: &str) -> Result<String> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::archive(format!("Invalid filename '{}'", filename)));
    }

    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        Ok(format!("/{}", name))
    } else {
        Ok(format!("/{}/{}", folder, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_under_folder() {
        assert_eq!(
            destination_path("/health_records", "labs.pdf").unwrap(),
            "/health_records/labs.pdf"
        );
        assert_eq!(
            destination_path("health_records/", "labs.pdf").unwrap(),
            "/health_records/labs.pdf"
        );
        assert_eq!(destination_path("/", "labs.pdf").unwrap(), "/labs.pdf");
    }

    #[test]
    fn test_destination_strips_client_directories() {
        assert_eq!(
            destination_path("/health_records", "../../etc/passwd.pdf").unwrap(),
            "/health_records/passwd.pdf"
        );
        assert_eq!(
            destination_path("/health_records", "C:\\scans\\mri.pdf").unwrap(),
            "/health_records/mri.pdf"
        );
    }

    #[test]
    fn test_destination_rejects_empty_names() {
        assert!(destination_path("/health_records", "reports/").is_err());
        assert!(destination_path("/health_records", "..").is_err());
    }
}
