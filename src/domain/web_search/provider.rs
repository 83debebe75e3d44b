//! Web search provider trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::answer::WebEvidence;
use crate::domain::DomainError;

/// Trait for web search backends used by the fallback stage.
///
/// Adapters normalize whatever the backend returns into `WebEvidence`;
/// results with no usable URL are dropped. A missing credential is not an
/// error: the adapter returns an empty list and the query proceeds on
/// corpus evidence alone.
#[async_trait]
pub trait WebSearchProvider: Send + Sync + Debug {
    /// Search the public web, returning at most `limit` results.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<WebEvidence>, DomainError>;

    /// Provider name for logging and error messages.
    fn provider_name(&self) -> &'static str;
}
