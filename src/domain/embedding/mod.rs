//! Embedding domain: provider trait

pub mod provider;

pub use provider::EmbeddingProvider;
