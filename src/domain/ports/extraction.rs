use crate::domain::errors::AnalysisError;
use async_trait::async_trait;

/// Structured-extraction model boundary. Prompt construction and response
/// parsing live in the application layer; this port only moves text.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    async fn extract(&self, prompt: &str) -> Result<String, AnalysisError>;
}
