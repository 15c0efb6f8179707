mod embedding;
mod extraction;
mod llm;
mod parser;

pub use embedding::EmbeddingService;
pub use extraction::ExtractionService;
pub use llm::LlmService;
pub use parser::ResumeParser;
