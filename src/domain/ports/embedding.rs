use crate::domain::{errors::AnalysisError, Embedding};
use async_trait::async_trait;

/// Embedding model boundary. The same implementation must be used for
/// index build and query so vectors stay comparable.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, AnalysisError>;
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, AnalysisError>;
    fn dimension(&self) -> usize;
}
