//! Document text extraction for uploaded medical reports

#[cfg(test)]
pub(crate) mod fixtures;
mod parser;

pub use parser::PdfExtractor;

use crate::error::Result;

/// Turns raw document bytes into plain text
///
/// Implementations are pure transforms: no I/O beyond reading the given bytes.
/// Extraction is CPU-bound; async callers run it on the blocking pool.
pub trait DocumentExtractor: Send + Sync {
    /// Extractor name for logging
    fn name(&self) -> &str;

    /// Whether a file with this name is eligible for extraction
    fn supports(&self, filename: &str) -> bool;

    /// Extract plain text, failing with `Error::Extraction` for unparseable input
    fn extract(&self, data: &[u8]) -> Result<String>;
}
