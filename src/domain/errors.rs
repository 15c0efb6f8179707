use thiserror::Error;

/// Pipeline stage an error is attributed to, for caller-facing reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Index,
    Extract,
    Assess,
    Config,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Index => "index",
            Stage::Extract => "extract",
            Stage::Assess => "assess",
            Stage::Config => "config",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Load error: {0}")]
    Load(String),

    #[error("Model unavailable ({stage}): {msg}")]
    ModelUnavailable { stage: Stage, msg: String },

    #[error("Extraction parse error: {0}")]
    ExtractionParse(String),

    #[error("Assessment service error: {0}")]
    AssessmentService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AnalysisError {
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// An unreachable or misbehaving model service, attributed to the
    /// stage whose client observed the failure.
    pub fn model_unavailable(stage: Stage, msg: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            stage,
            msg: msg.into(),
        }
    }

    pub fn extraction_parse(msg: impl Into<String>) -> Self {
        Self::ExtractionParse(msg.into())
    }

    pub fn assessment(msg: impl Into<String>) -> Self {
        Self::AssessmentService(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Stage that produced the error, for user-visible reporting.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Load(_) => Stage::Load,
            Self::ModelUnavailable { stage, .. } => *stage,
            Self::ExtractionParse(_) => Stage::Extract,
            Self::AssessmentService(_) => Stage::Assess,
            Self::Configuration(_) => Stage::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_keeps_failure_site_stage() {
        let from_embedding = AnalysisError::model_unavailable(Stage::Index, "unreachable");
        let from_extraction = AnalysisError::model_unavailable(Stage::Extract, "unreachable");

        assert_eq!(from_embedding.stage(), Stage::Index);
        assert_eq!(from_extraction.stage(), Stage::Extract);
        assert!(from_extraction.to_string().contains("extract"));
    }

    #[test]
    fn test_fixed_stage_attribution() {
        assert_eq!(AnalysisError::load("x").stage(), Stage::Load);
        assert_eq!(AnalysisError::extraction_parse("x").stage(), Stage::Extract);
        assert_eq!(AnalysisError::assessment("x").stage(), Stage::Assess);
        assert_eq!(AnalysisError::configuration("x").stage(), Stage::Config);
    }
}
