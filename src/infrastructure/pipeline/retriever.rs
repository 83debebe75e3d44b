//! Context retrieval stage

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::chunk::RetrievedContext;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::vector_store::VectorStore;
use crate::domain::DomainError;

/// Embeds a query and fetches the nearest chunks from the store.
///
/// Retrieval failures are hard failures: an unanswerable embedding call
/// or store search aborts the whole query rather than degrading to an
/// empty context.
#[derive(Debug)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    top_k: u32,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            store,
            top_k: 20,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    /// Retrieve the configured number of nearest chunks.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedContext>, DomainError> {
        self.retrieve_top(query, self.top_k).await
    }

    /// Retrieve the `k` nearest chunks, best first.
    pub async fn retrieve_top(
        &self,
        query: &str,
        k: u32,
    ) -> Result<Vec<RetrievedContext>, DomainError> {
        debug!(query_chars = query.len(), k = k, "Embedding query");

        let mut vectors = self.embedder.embed(vec![query.to_string()]).await?;
        let vector = match vectors.pop() {
            Some(v) if vectors.is_empty() => v,
            _ => {
                return Err(DomainError::provider(
                    self.embedder.provider_name(),
                    "Expected exactly one query embedding",
                ));
            }
        };

        let contexts = self.store.search(vector, k).await?;

        info!(
            backend = self.store.backend_name(),
            hits = contexts.len(),
            k = k,
            "Retrieval completed"
        );

        Ok(contexts)
    }
}
