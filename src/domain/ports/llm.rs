use crate::domain::errors::AnalysisError;
use async_trait::async_trait;

/// Hosted large-language-model boundary used for candidate assessment.
#[async_trait]
pub trait LlmService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError>;
}
