//! Embedding provider trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Trait for embedding backends (OpenAI, Ollama, ...).
///
/// Vectors come back positionally paired with the input texts: the vector
/// at index `i` embeds `texts[i]`, and the output length always equals the
/// input length.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed a batch of texts.
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Provider name for logging and error messages.
    fn provider_name(&self) -> &'static str;

    /// Dimensionality of the vectors this provider produces.
    fn dimensions(&self) -> u32;
}
