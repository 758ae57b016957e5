//! Ollama Client
//!
//! LLM client implementation for a local Ollama server.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::LlmError;
use crate::llm_client::LlmClient;

/// Default Ollama endpoint
const DEFAULT_HOST: &str = "http://localhost:11434";

/// Default model to generate with
const DEFAULT_MODEL: &str = "llama2";

/// Ollama API client
#[derive(Clone)]
pub struct OllamaClient {
    host: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaClient {
    /// Create a new client for the given host and model
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create from `OLLAMA_HOST` / `OLLAMA_MODEL` environment variables
    pub fn from_env() -> Self {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(host, model)
    }

    async fn call_api(&self, prompt: &str) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "model": &self.model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .client
            .post(format!("{}/api/generate", self.host))
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Transport(format!(
                "Ollama API error {}: {}",
                status, body
            )));
        }

        #[derive(Deserialize)]
        struct GenerateResponse {
            response: String,
        }

        let api_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Malformed(e.to_string()))?;

        Ok(api_response.response)
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling Ollama");
        self.call_api(prompt).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
