use serde::{Deserialize, Serialize};

/// Fixed-length vector produced by the embedding model for one text.
///
/// Comparisons only make sense between vectors from the same model
/// configuration; mismatched dimensions score zero rather than panic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn cosine_similarity(&self, other: &Embedding) -> f32 {
        if self.values.len() != other.values.len() || self.values.is_empty() {
            return 0.0;
        }

        let mut dot = 0.0f32;
        let mut norm_self = 0.0f32;
        let mut norm_other = 0.0f32;
        for (a, b) in self.values.iter().zip(&other.values) {
            dot += a * b;
            norm_self += a * a;
            norm_other += b * b;
        }

        let denom = norm_self.sqrt() * norm_other.sqrt();
        if denom == 0.0 {
            return 0.0;
        }

        dot / denom
    }
}
