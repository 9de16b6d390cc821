//! PDF text extraction

use lopdf::Document;

use super::DocumentExtractor;
use crate::error::{Error, Result};

/// PDF extractor backed by `lopdf`
///
/// Pages are read in document order. A page whose text cannot be decoded
/// (image-only scans, unsupported fonts) contributes an empty string, and
/// every page is followed by a newline.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf"
    }

    /// Literal, case-sensitive `.pdf` suffix
    fn supports(&self, filename: &str) -> bool {
        filename.ends_with(".pdf")
    }

    fn extract(&self, data: &[u8]) -> Result<String> {
        let doc = Document::load_mem(data).map_err(|e| Error::extraction(e.to_string()))?;

        let pages = doc.get_pages();
        let mut text = String::new();

        for &page_number in pages.keys() {
            match doc.extract_text(&[page_number]) {
                // lopdf closes every text block with a newline already
                Ok(page_text) => {
                    text.push_str(page_text.strip_suffix('\n').unwrap_or(&page_text))
                }
                Err(e) => {
                    tracing::debug!("No text extracted from page {}: {}", page_number, e);
                }
            }
            text.push('\n');
        }

        tracing::debug!(
            "Extracted {} characters from {} page(s)",
            text.chars().count(),
            pages.len()
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::fixtures::pdf_with_pages;

    #[test]
    fn test_supports_literal_pdf_suffix() {
        let extractor = PdfExtractor::new();
        assert!(extractor.supports("labs.pdf"));
        assert!(extractor.supports("/tmp/reports/labs.pdf"));
        assert!(extractor.supports(".pdf"));
        assert!(!extractor.supports("REPORT.PDF"));
        assert!(!extractor.supports("labs.docx"));
        assert!(!extractor.supports("labs.pdf.png"));
        assert!(!extractor.supports("pdf"));
        assert!(!extractor.supports(""));
    }

    #[test]
    fn test_extract_single_page() {
        let bytes = pdf_with_pages(&["Hemoglobin 13.5 g/dL"]);
        let text = PdfExtractor::new().extract(&bytes).unwrap();

        assert_eq!(text, "Hemoglobin 13.5 g/dL\n");
    }

    #[test]
    fn test_extract_keeps_page_order() {
        let bytes = pdf_with_pages(&["Page one cholesterol", "Page two glucose"]);
        let text = PdfExtractor::new().extract(&bytes).unwrap();

        assert_eq!(text, "Page one cholesterol\nPage two glucose\n");
    }

    #[test]
    fn test_page_without_contents_is_empty_line() {
        let bytes = pdf_with_pages(&[""]);
        let text = PdfExtractor::new().extract(&bytes).unwrap();

        assert_eq!(text, "\n");
    }

    #[test]
    fn test_empty_page_keeps_its_separator() {
        let bytes = pdf_with_pages(&["Glucose 92 mg/dL", ""]);
        let text = PdfExtractor::new().extract(&bytes).unwrap();

        assert_eq!(text, "Glucose 92 mg/dL\n\n");

        let bytes = pdf_with_pages(&["", "Glucose 92 mg/dL"]);
        let text = PdfExtractor::new().extract(&bytes).unwrap();

        assert_eq!(text, "\nGlucose 92 mg/dL\n");
    }

    #[test]
    fn test_extract_is_deterministic() {
        let bytes = pdf_with_pages(&["Platelets 250"]);
        let extractor = PdfExtractor::new();
        assert_eq!(
            extractor.extract(&bytes).unwrap(),
            extractor.extract(&bytes).unwrap()
        );
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_error() {
        let err = PdfExtractor::new()
            .extract(b"definitely not a pdf")
            .unwrap_err();

        assert!(matches!(err, Error::Extraction(_)));
        assert!(!err.to_string().is_empty());
    }
}
