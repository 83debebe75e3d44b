//! Ollama generation provider implementation

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::domain::llm::{GenerationParams, LlmProvider};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Ollama provider speaking the non-streaming `/api/generate` protocol.
#[derive(Debug)]
pub struct OllamaProvider<C: HttpClientTrait> {
    http_client: C,
    base_url: String,
}

impl<C: HttpClientTrait> OllamaProvider<C> {
    pub fn new(http_client: C) -> Self {
        Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    fn build_request(model: &str, prompt: &str, params: GenerationParams) -> serde_json::Value {
        json!({
            "model": model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": params.temperature,
                "num_predict": params.max_tokens,
            },
        })
    }

    fn parse_response(value: serde_json::Value) -> Result<String, DomainError> {
        let response: GenerateResponse = serde_json::from_value(value).map_err(|e| {
            DomainError::provider("ollama", format!("Unexpected response shape: {}", e))
        })?;
        Ok(response.response)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OllamaProvider<C> {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, DomainError> {
        let body = Self::build_request(model, prompt, params);

        tracing::debug!(
            model = model,
            prompt_chars = prompt.len(),
            temperature = params.temperature,
            max_tokens = params.max_tokens,
            "Sending generate request"
        );

        let value = self
            .http_client
            .post_json(&self.generate_url(), vec![], &body)
            .await?;

        Self::parse_response(value)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}
