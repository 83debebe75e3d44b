//! Web evidence fallback stage

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::answer::WebEvidence;
use crate::domain::web_search::WebSearchProvider;

/// Fetches live web evidence when the quality gate fails a draft.
///
/// This stage runs on the recovery path, so it never fails: provider
/// errors are logged and resolve to an empty evidence list, and the
/// query proceeds on whatever the corpus alone supports.
#[derive(Debug)]
pub struct WebFallback {
    provider: Arc<dyn WebSearchProvider>,
    limit: u32,
}

impl WebFallback {
    pub fn new(provider: Arc<dyn WebSearchProvider>) -> Self {
        Self { provider, limit: 3 }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub async fn gather(&self, query: &str) -> Vec<WebEvidence> {
        match self.provider.search(query, self.limit).await {
            Ok(evidence) => {
                info!(
                    provider = self.provider.provider_name(),
                    results = evidence.len(),
                    "Web fallback completed"
                );
                evidence
            }
            Err(e) => {
                warn!(
                    provider = self.provider.provider_name(),
                    error = %e,
                    "Web fallback failed, continuing without web evidence"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::web_search::provider::mock::MockWebSearchProvider;

    #[tokio::test]
    async fn test_gather_returns_provider_results() {
        let provider = Arc::new(MockWebSearchProvider::new().with_results(vec![
            WebEvidence::new("https://a.example", "A", "snippet a"),
            WebEvidence::new("https://b.example", "B", "snippet b"),
        ]));
        let fallback = WebFallback::new(provider.clone());

        let evidence = fallback.gather("recent gdpr rulings").await;

        assert_eq!(evidence.len(), 2);
        assert_eq!(provider.search_calls(), 1);
    }

    #[tokio::test]
    async fn test_gather_respects_limit() {
        let provider = Arc::new(MockWebSearchProvider::new().with_results(vec![
            WebEvidence::new("https://1.example", "", ""),
            WebEvidence::new("https://2.example", "", ""),
            WebEvidence::new("https://3.example", "", ""),
        ]));
        let fallback = WebFallback::new(provider).with_limit(2);

        let evidence = fallback.gather("q").await;

        assert_eq!(evidence.len(), 2);
    }

    #[tokio::test]
    async fn test_gather_absorbs_provider_errors() {
        let provider = Arc::new(MockWebSearchProvider::new().with_error("quota exceeded"));
        let fallback = WebFallback::new(provider.clone());

        let evidence = fallback.gather("q").await;

        assert!(evidence.is_empty());
        assert_eq!(provider.search_calls(), 1);
    }
}
