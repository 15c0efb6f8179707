use serde::{Deserialize, Serialize};

use super::keywords::KeywordRecord;

/// Caller-facing result of one full pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub keywords: KeywordRecord,
    pub assessment: String,
    pub warnings: Vec<String>,
}
