use std::time::Duration;

use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::openai;

use crate::domain::{ports::ExtractionService, AnalysisError, Stage};
use crate::infrastructure::config::ExtractionConfig;

/// Client for the structured-extraction model, served over an
/// OpenAI-compatible completions endpoint (e.g. NuExtract behind vLLM).
pub struct NuExtractModel {
    model: String,
    timeout: Duration,
}

impl NuExtractModel {
    pub fn new(config: &ExtractionConfig, timeout: Duration) -> Self {
        Self {
            model: config.model.clone(),
            timeout,
        }
    }
}

#[async_trait]
impl ExtractionService for NuExtractModel {
    async fn extract(&self, prompt: &str) -> Result<String, AnalysisError> {
        let client = openai::Client::from_env();
        let agent = client.agent(&self.model).build();

        tokio::time::timeout(self.timeout, agent.prompt(prompt))
            .await
            .map_err(|_| AnalysisError::model_unavailable(Stage::Extract, "extraction request timed out"))?
            .map_err(|e| AnalysisError::model_unavailable(Stage::Extract, e.to_string()))
    }
}
