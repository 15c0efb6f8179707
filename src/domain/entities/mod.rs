mod document;
mod embedding;
mod index;
mod keywords;
mod report;

pub use document::{chunk_pages, Document, DocumentChunk, SearchResult};
pub use embedding::Embedding;
pub use index::{EmbeddingIndex, EmbeddingRecord};
pub use keywords::{KeywordRecord, KeywordSchema};
pub use report::AnalysisReport;
