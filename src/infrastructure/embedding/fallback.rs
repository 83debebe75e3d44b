//! Embedding provider with a configured fallback backend

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::DomainError;

/// Wraps a primary embedding backend with an optional fallback.
///
/// When the primary fails and a fallback is configured, the batch is
/// retried once against the fallback. If that fails too, the primary's
/// error is the one surfaced. Dimensions are reported from the primary,
/// which is what the store schema is sized for.
#[derive(Debug)]
pub struct FallbackEmbeddingProvider {
    primary: Arc<dyn EmbeddingProvider>,
    fallback: Option<Arc<dyn EmbeddingProvider>>,
}

impl FallbackEmbeddingProvider {
    pub fn new(
        primary: Arc<dyn EmbeddingProvider>,
        fallback: Option<Arc<dyn EmbeddingProvider>>,
    ) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl EmbeddingProvider for FallbackEmbeddingProvider {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
        let primary_err = match self.primary.embed(texts.clone()).await {
            Ok(vectors) => return Ok(vectors),
            Err(e) => e,
        };

        let Some(ref fallback) = self.fallback else {
            return Err(primary_err);
        };

        tracing::warn!(
            primary = self.primary.provider_name(),
            fallback = fallback.provider_name(),
            error = %primary_err,
            "Primary embedding backend failed, trying fallback"
        );

        match fallback.embed(texts).await {
            Ok(vectors) => Ok(vectors),
            Err(fallback_err) => {
                tracing::error!(
                    fallback = fallback.provider_name(),
                    error = %fallback_err,
                    "Fallback embedding backend failed too"
                );
                Err(primary_err)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "fallback"
    }

    fn dimensions(&self) -> u32 {
        self.primary.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::provider::mock::MockEmbeddingProvider;

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let primary = Arc::new(MockEmbeddingProvider::new("primary", 8));
        let fallback = Arc::new(MockEmbeddingProvider::new("fallback", 8));
        let provider =
            FallbackEmbeddingProvider::new(primary.clone(), Some(fallback.clone()));

        let vectors = provider.embed(vec!["text".into()]).await.unwrap();

        assert_eq!(vectors.len(), 1);
        assert_eq!(primary.embed_calls(), 1);
        assert_eq!(fallback.embed_calls(), 0);
    }

    #[tokio::test]
    async fn test_fallback_used_when_primary_fails() {
        let primary = Arc::new(MockEmbeddingProvider::new("primary", 8).with_error("down"));
        let fallback = Arc::new(MockEmbeddingProvider::new("fallback", 8));
        let provider =
            FallbackEmbeddingProvider::new(primary.clone(), Some(fallback.clone()));

        let vectors = provider.embed(vec!["text".into()]).await.unwrap();

        assert_eq!(vectors.len(), 1);
        assert_eq!(fallback.embed_calls(), 1);
    }

    #[tokio::test]
    async fn test_both_failing_surfaces_primary_error() {
        let primary =
            Arc::new(MockEmbeddingProvider::new("primary", 8).with_error("primary down"));
        let fallback =
            Arc::new(MockEmbeddingProvider::new("fallback", 8).with_error("fallback down"));
        let provider = FallbackEmbeddingProvider::new(primary, Some(fallback));

        let err = provider.embed(vec!["text".into()]).await.unwrap_err();

        assert!(err.to_string().contains("primary down"));
    }

    #[tokio::test]
    async fn test_no_fallback_configured() {
        let primary = Arc::new(MockEmbeddingProvider::new("primary", 8).with_error("down"));
        let provider = FallbackEmbeddingProvider::new(primary, None);

        assert!(provider.embed(vec!["text".into()]).await.is_err());
    }

    #[test]
    fn test_dimensions_follow_primary() {
        let primary = Arc::new(MockEmbeddingProvider::new("primary", 1536));
        let fallback = Arc::new(MockEmbeddingProvider::new("fallback", 768));
        let provider = FallbackEmbeddingProvider::new(primary, Some(fallback));

        assert_eq!(provider.dimensions(), 1536);
    }
}
