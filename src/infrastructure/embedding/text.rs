use std::time::Duration;

use async_trait::async_trait;
use rig::client::{EmbeddingsClient, ProviderClient};
use rig::embeddings::EmbeddingsBuilder;
use rig::providers::openai;

use crate::domain::{ports::EmbeddingService, AnalysisError, Embedding, Stage};
use crate::infrastructure::config::EmbeddingConfig;

/// Embedding model client over the OpenAI embeddings API.
///
/// The same instance (same model, same dimension) must serve both index
/// build and query so vectors stay comparable.
pub struct TextEmbedding {
    model: String,
    dimension: usize,
    timeout: Duration,
}

impl TextEmbedding {
    pub fn new(config: &EmbeddingConfig, timeout: Duration) -> Self {
        Self {
            model: config.model.clone(),
            dimension: config.dimension,
            timeout,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl EmbeddingService for TextEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, AnalysisError> {
        let mut embeddings = self.request(&[text]).await?;
        embeddings
            .pop()
            .ok_or_else(|| AnalysisError::model_unavailable(Stage::Index, "no embedding returned"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, AnalysisError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

impl TextEmbedding {
    async fn request(&self, texts: &[&str]) -> Result<Vec<Embedding>, AnalysisError> {
        let client = openai::Client::from_env();
        let model = client.embedding_model(&self.model);

        let mut builder = EmbeddingsBuilder::new(model);
        for text in texts {
            builder = builder
                .document(*text)
                .map_err(|e| AnalysisError::model_unavailable(Stage::Index, e.to_string()))?;
        }

        let embeddings = tokio::time::timeout(self.timeout, builder.build())
            .await
            .map_err(|_| AnalysisError::model_unavailable(Stage::Index, "embedding request timed out"))?
            .map_err(|e| AnalysisError::model_unavailable(Stage::Index, e.to_string()))?;

        Ok(embeddings
            .into_iter()
            .map(|(_doc, emb)| {
                let vec_f32: Vec<f32> = emb.first().vec.into_iter().map(|x| x as f32).collect();
                Embedding::new(vec_f32)
            })
            .collect())
    }
}
