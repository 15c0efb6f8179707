mod assessment;
mod extractor;
mod index;
mod loader;
mod pipeline;
mod store;

pub use assessment::AssessmentGenerator;
pub use extractor::KeywordExtractor;
pub use index::IndexService;
pub use loader::{DocumentLoader, LoadOutcome};
pub use pipeline::AnalysisPipeline;
pub use store::{ResumeStore, UploadedFile};
