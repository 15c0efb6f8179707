use crate::domain::errors::AnalysisError;

/// PDF text extraction boundary. Returns one string per page, in order.
pub trait ResumeParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<String>, AnalysisError>;
}
