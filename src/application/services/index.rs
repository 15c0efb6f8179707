use std::sync::Arc;

use tracing::instrument;

use crate::domain::{
    chunk_pages, ports::EmbeddingService, AnalysisError, Document, EmbeddingIndex,
    EmbeddingRecord, Result, SearchResult, Stage,
};

/// Builds and queries the similarity index over résumé chunks.
///
/// The build is all-or-nothing: any embedding failure, count mismatch, or
/// wrong-dimension vector discards the partial build and surfaces
/// `ModelUnavailable`. Rebuilding from scratch when the source documents
/// change is the intended usage.
pub struct IndexService {
    embedding: Arc<dyn EmbeddingService>,
    chunk_size: usize,
}

impl IndexService {
    pub fn new(embedding: Arc<dyn EmbeddingService>, chunk_size: usize) -> Self {
        Self {
            embedding,
            chunk_size,
        }
    }

    #[instrument(skip(self, documents), fields(documents = documents.len()))]
    pub async fn build(&self, documents: &[Document]) -> Result<EmbeddingIndex> {
        let mut chunks = Vec::new();
        for doc in documents {
            chunks.extend(chunk_pages(doc.id, &doc.pages, self.chunk_size));
        }

        if chunks.is_empty() {
            return Ok(EmbeddingIndex::default());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(AnalysisError::model_unavailable(
                Stage::Index,
                format!(
                    "embedding model returned {} vectors for {} chunks",
                    embeddings.len(),
                    chunks.len()
                ),
            ));
        }

        let expected = self.embedding.dimension();
        let mut records = Vec::with_capacity(chunks.len());
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            if embedding.dimension() != expected {
                return Err(AnalysisError::model_unavailable(
                    Stage::Index,
                    format!(
                        "embedding model returned a {}-dimensional vector, expected {expected}",
                        embedding.dimension()
                    ),
                ));
            }
            records.push(EmbeddingRecord { chunk, embedding });
        }

        Ok(EmbeddingIndex::new(records))
    }

    #[instrument(skip(self, index), fields(index_size = index.len()))]
    pub async fn query(
        &self,
        index: &EmbeddingIndex,
        text: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let embedding = self.embedding.embed(text).await?;
        Ok(index.search(&embedding, top_k))
    }
}
