use std::time::Duration;

use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::mistral;

use crate::domain::{ports::LlmService, AnalysisError};
use crate::infrastructure::config::LlmConfig;

/// Hosted assessment model client (Mistral). One request per call, no
/// retries; timeouts surface as assessment errors for the caller to
/// handle.
pub struct MistralLlm {
    model: String,
    timeout: Duration,
}

impl MistralLlm {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LlmService for MistralLlm {
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        let client = mistral::Client::from_env();
        let agent = client.agent(&self.model).build();

        tokio::time::timeout(self.timeout, agent.prompt(prompt))
            .await
            .map_err(|_| AnalysisError::assessment("assessment request timed out"))?
            .map_err(|e| AnalysisError::assessment(e.to_string()))
    }
}
