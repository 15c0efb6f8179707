//! Résumé analysis pipeline: PDF ingestion, embedding-based retrieval,
//! structured keyword extraction, and LLM candidate assessment.

pub mod application;
pub mod domain;
pub mod infrastructure;
