use serde::{Deserialize, Serialize};

use super::document::{DocumentChunk, SearchResult};
use super::embedding::Embedding;

/// One indexed chunk together with its vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub chunk: DocumentChunk,
    pub embedding: Embedding,
}

/// In-memory similarity index over a fixed set of chunks.
///
/// The index owns its records and is built in one shot; replacing the
/// source documents means building a new index, there is no incremental
/// update. Records are kept in insertion order, which equals the original
/// chunk order, so equal-score queries resolve deterministically.
#[derive(Debug, Default)]
pub struct EmbeddingIndex {
    records: Vec<EmbeddingRecord>,
}

impl EmbeddingIndex {
    pub fn new(records: Vec<EmbeddingRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EmbeddingRecord] {
        &self.records
    }

    /// Top-k records by cosine similarity to `query`, descending.
    ///
    /// Ties keep insertion order (the sort is stable), so the first
    /// inserted chunk wins. For `k >= len` the whole index is returned.
    pub fn search(&self, query: &Embedding, top_k: usize) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .records
            .iter()
            .map(|record| SearchResult {
                chunk: record.chunk.clone(),
                score: query.cosine_similarity(&record.embedding),
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn record(content: &str, index: usize, vec: Vec<f32>) -> EmbeddingRecord {
        EmbeddingRecord {
            chunk: DocumentChunk::new(Uuid::new_v4(), content, index, 0),
            embedding: Embedding::new(vec),
        }
    }

    #[test]
    fn test_search_orders_by_descending_score() {
        let index = EmbeddingIndex::new(vec![
            record("far", 0, vec![0.0, 1.0]),
            record("near", 1, vec![1.0, 0.0]),
        ]);

        let results = index.search(&Embedding::new(vec![1.0, 0.0]), 2);
        assert_eq!(results[0].chunk.content, "near");
        assert_eq!(results[1].chunk.content, "far");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_search_breaks_ties_by_insertion_order() {
        let index = EmbeddingIndex::new(vec![
            record("first", 0, vec![1.0, 0.0]),
            record("second", 1, vec![1.0, 0.0]),
        ]);

        let results = index.search(&Embedding::new(vec![1.0, 0.0]), 2);
        assert_eq!(results[0].chunk.content, "first");
        assert_eq!(results[1].chunk.content, "second");
    }

    #[test]
    fn test_search_k_larger_than_index_returns_all() {
        let index = EmbeddingIndex::new(vec![
            record("a", 0, vec![1.0, 0.0]),
            record("b", 1, vec![0.0, 1.0]),
        ]);

        let results = index.search(&Embedding::new(vec![1.0, 1.0]), 10);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_truncates_to_k() {
        let index = EmbeddingIndex::new(vec![
            record("a", 0, vec![1.0, 0.0]),
            record("b", 1, vec![0.9, 0.1]),
            record("c", 2, vec![0.0, 1.0]),
        ]);

        let results = index.search(&Embedding::new(vec![1.0, 0.0]), 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.content, "a");
    }

    #[test]
    fn test_empty_index() {
        let index = EmbeddingIndex::default();
        assert!(index.is_empty());
        assert!(index.search(&Embedding::new(vec![1.0]), 5).is_empty());
    }
}
