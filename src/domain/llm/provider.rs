//! Generation model provider trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::request::GenerationParams;
use crate::domain::DomainError;

/// Trait for text generation backends.
///
/// The pipeline stages hand a fully rendered prompt to the provider and
/// get the raw completion text back. Prompt construction, truncation and
/// output parsing stay with the stages.
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Run a single non-streaming completion.
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, DomainError>;

    /// Provider name for logging and error messages.
    fn provider_name(&self) -> &'static str;
}
