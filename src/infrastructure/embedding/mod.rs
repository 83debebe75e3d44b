//! Embedding provider adapters

pub mod fallback;
pub mod ollama;
pub mod openai;

pub use fallback::FallbackEmbeddingProvider;
pub use ollama::OllamaEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;
