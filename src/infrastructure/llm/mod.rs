//! Generation model adapters

pub mod ollama;

pub use ollama::OllamaProvider;
