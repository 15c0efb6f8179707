pub mod config;
pub mod embedding;
pub mod extraction;
pub mod llm;
pub mod parser;

pub use config::{Config, EmbeddingConfig, ExtractionConfig, LlmConfig};
pub use embedding::TextEmbedding;
pub use extraction::NuExtractModel;
pub use llm::MistralLlm;
pub use parser::PdfExtractParser;

use std::sync::Arc;
use std::time::Duration;

use crate::application::{
    AnalysisPipeline, AssessmentGenerator, DocumentLoader, IndexService, KeywordExtractor,
};

/// Wires a production pipeline from a validated config. Each call builds an
/// isolated pipeline; nothing is shared between instances.
pub fn build_pipeline(config: &Config) -> AnalysisPipeline {
    let timeout = Duration::from_secs(config.llm.timeout_seconds);

    let embedding = Arc::new(TextEmbedding::new(&config.embedding, timeout));
    let extraction = Arc::new(NuExtractModel::new(&config.extraction, timeout));
    let llm = Arc::new(MistralLlm::new(&config.llm));

    AnalysisPipeline::new(
        DocumentLoader::new(Arc::new(PdfExtractParser)),
        IndexService::new(embedding, config.chunk_size),
        KeywordExtractor::new(extraction),
        AssessmentGenerator::new(llm),
        config.top_k,
    )
}
