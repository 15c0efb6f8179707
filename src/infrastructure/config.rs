use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{AnalysisError, Result};

/// Explicit configuration value passed into each component's constructor.
/// Nothing here is process-global, so tests can run isolated pipelines
/// with their own settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential for the hosted assessment model.
    pub api_key: String,
    pub data_folder: PathBuf,
    pub chunk_size: usize,
    pub top_k: usize,
    pub max_file_bytes: usize,
    pub embedding: EmbeddingConfig,
    pub extraction: ExtractionConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            data_folder: PathBuf::from("data"),
            chunk_size: 1000,
            top_k: 4,
            max_file_bytes: 5 * 1024 * 1024,
            embedding: EmbeddingConfig::default(),
            extraction: ExtractionConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimension: 1536,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: "numind/NuExtract-tiny".to_string(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "mistral-small-latest".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Config {
    /// Loads configuration from an optional `config.json` next to the
    /// working directory, then applies environment-variable overrides and
    /// validates. A missing credential fails here, before any model call.
    pub fn load() -> Result<Self> {
        let mut config = match std::fs::read_to_string("config.json") {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| AnalysisError::configuration(format!("invalid config.json: {e}")))?,
            Err(_) => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("MISTRAL_API_KEY") {
            self.api_key = key;
        }
        if let Ok(folder) = std::env::var("DATA_FOLDER") {
            self.data_folder = PathBuf::from(folder);
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            self.embedding.model = model;
        }
        if let Ok(model) = std::env::var("EXTRACTION_MODEL") {
            self.extraction.model = model;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            self.llm.model = model;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(AnalysisError::configuration(
                "missing assessment API credential (set MISTRAL_API_KEY)",
            ));
        }
        if self.chunk_size == 0 {
            return Err(AnalysisError::configuration("chunk_size must be positive"));
        }
        if self.embedding.dimension == 0 {
            return Err(AnalysisError::configuration(
                "embedding dimension must be positive",
            ));
        }
        if self.llm.timeout_seconds == 0 {
            return Err(AnalysisError::configuration(
                "llm timeout must be positive",
            ));
        }
        Ok(())
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn with_data_folder(mut self, folder: impl AsRef<Path>) -> Self {
        self.data_folder = folder.as_ref().to_path_buf();
        self
    }
}
