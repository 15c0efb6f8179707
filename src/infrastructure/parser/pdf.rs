use crate::domain::{ports::ResumeParser, AnalysisError};

/// PDF text extraction backed by the `pdf-extract` crate.
pub struct PdfExtractParser;

impl ResumeParser for PdfExtractParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<String>, AnalysisError> {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| AnalysisError::load(format!("PDF text extraction failed: {e}")))
    }
}
