//! Ollama embedding provider implementation

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

const DEFAULT_MODEL: &str = "nomic-embed-text";

/// Known Ollama embedding models and their dimensions
const EMBEDDING_MODELS: &[(&str, u32)] = &[
    ("nomic-embed-text", 768),
    ("mxbai-embed-large", 1024),
    ("all-minilm", 384),
];

/// Ollama embedding provider.
///
/// The `/api/embeddings` endpoint takes one prompt per request, so a
/// batch turns into sequential calls, one per text.
#[derive(Debug)]
pub struct OllamaEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
    model: String,
    dimensions: u32,
}

impl<C: HttpClientTrait> OllamaEmbeddingProvider<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            dimensions: lookup_dimensions(DEFAULT_MODEL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self.dimensions = lookup_dimensions(&self.model);
        self
    }

    fn embeddings_url(&self) -> String {
        format!("{}/api/embeddings", self.base_url)
    }
}

fn lookup_dimensions(model: &str) -> u32 {
    EMBEDDING_MODELS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, dims)| *dims)
        .unwrap_or(768)
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OllamaEmbeddingProvider<C> {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
        let url = self.embeddings_url();
        let mut vectors = Vec::with_capacity(texts.len());

        for text in texts {
            let body = json!({
                "model": self.model,
                "prompt": text,
            });

            let value = self.client.post_json(&url, vec![], &body).await?;
            let response: EmbeddingsResponse = serde_json::from_value(value).map_err(|e| {
                DomainError::provider(
                    "ollama",
                    format!("Failed to parse embedding response: {}", e),
                )
            })?;

            vectors.push(response.embedding);
        }

        Ok(vectors)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn dimensions(&self) -> u32 {
        self.dimensions
    }
}
