//! OpenAI embedding provider implementation

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Known OpenAI embedding models and their dimensions
const EMBEDDING_MODELS: &[(&str, u32)] = &[
    ("text-embedding-3-small", 1536),
    ("text-embedding-3-large", 3072),
    ("text-embedding-ada-002", 1536),
];

/// OpenAI embedding provider
#[derive(Debug)]
pub struct OpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    model: String,
    dimensions: u32,
}

impl<C: HttpClientTrait> OpenAiEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
            model: DEFAULT_MODEL.to_string(),
            dimensions: lookup_dimensions(DEFAULT_MODEL),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self.dimensions = lookup_dimensions(&self.model);
        self
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(value: serde_json::Value) -> Result<Vec<Vec<f32>>, DomainError> {
        let response: OpenAiEmbeddingResponse = serde_json::from_value(value).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse embedding response: {}", e))
        })?;

        let mut data = response.data;
        data.sort_by_key(|d| d.index);

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

fn lookup_dimensions(model: &str) -> u32 {
    EMBEDDING_MODELS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, dims)| *dims)
        .unwrap_or(1536)
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddingProvider<C> {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = json!({
            "model": self.model,
            "input": texts,
        });

        let response = self
            .client
            .post_json(&self.embeddings_url(), self.headers(), &body)
            .await?;

        Self::parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn dimensions(&self) -> u32 {
        self.dimensions
    }
}

// OpenAI API types for embeddings

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/embeddings";

    fn create_mock_response(num_embeddings: usize, dimensions: usize) -> serde_json::Value {
        let data: Vec<serde_json::Value> = (0..num_embeddings)
            .map(|i| {
                let embedding: Vec<f32> = (0..dimensions).map(|j| (i + j) as f32 * 0.001).collect();
                json!({
                    "index": i,
                    "embedding": embedding,
                    "object": "embedding"
                })
            })
            .collect();

        json!({
            "model": "text-embedding-3-small",
            "data": data,
            "usage": {"prompt_tokens": 10, "total_tokens": 10}
        })
    }

    #[tokio::test]
    async fn test_embed_batch() {
        let client = MockHttpClient::new().with_response(TEST_URL, create_mock_response(3, 1536));
        let provider = OpenAiEmbeddingProvider::new(client, "test-api-key");

        let vectors = provider
            .embed(vec!["Hello".into(), "World".into(), "Test".into()])
            .await
            .unwrap();

        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[0].len(), 1536);
    }

    #[tokio::test]
    async fn test_embed_orders_by_index() {
        // Response arrives out of order; output must stay positional.
        let response = json!({
            "model": "text-embedding-3-small",
            "data": [
                {"index": 1, "embedding": [1.0]},
                {"index": 0, "embedding": [0.0]},
            ],
            "usage": {"prompt_tokens": 2, "total_tokens": 2}
        });
        let client = MockHttpClient::new().with_response(TEST_URL, response);
        let provider = OpenAiEmbeddingProvider::new(client, "key");

        let vectors = provider
            .embed(vec!["a".into(), "b".into()])
            .await
            .unwrap();

        assert_eq!(vectors[0], vec![0.0]);
        assert_eq!(vectors[1], vec![1.0]);
    }

    #[tokio::test]
    async fn test_embed_empty_batch_skips_request() {
        // No mock response configured; a request would fail.
        let provider = OpenAiEmbeddingProvider::new(MockHttpClient::new(), "key");

        let vectors = provider.embed(vec![]).await.unwrap();

        assert!(vectors.is_empty());
    }

    #[tokio::test]
    async fn test_embed_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "Rate limit exceeded");
        let provider = OpenAiEmbeddingProvider::new(client, "test-api-key");

        assert!(provider.embed(vec!["Hello".into()]).await.is_err());
    }

    #[test]
    fn test_provider_info() {
        let provider = OpenAiEmbeddingProvider::new(MockHttpClient::new(), "key");
        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.dimensions(), 1536);

        let provider = OpenAiEmbeddingProvider::new(MockHttpClient::new(), "key")
            .with_model("text-embedding-3-large");
        assert_eq!(provider.dimensions(), 3072);
    }
}
