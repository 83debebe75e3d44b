//! Vector store provider trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::chunk::{ChunkRecord, RetrievedContext};
use crate::domain::DomainError;

/// Result of a batch insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Number of records written
    pub inserted: usize,
}

impl InsertOutcome {
    pub fn new(inserted: usize) -> Self {
        Self { inserted }
    }
}

/// Trait for nearest-neighbor stores holding the chunked corpus.
///
/// The store is opaque to the pipeline: anything that can insert chunk
/// records, rank them against a query vector and answer a health probe
/// qualifies. Adapters fill missing stored fields with empty defaults so
/// search results always come back fully shaped.
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Insert a batch of chunk records.
    async fn insert(&self, records: Vec<ChunkRecord>) -> Result<InsertOutcome, DomainError>;

    /// Return the `top_k` records nearest to `vector`, best first.
    async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u32,
    ) -> Result<Vec<RetrievedContext>, DomainError>;

    /// Make inserted records durable and visible to search.
    async fn flush(&self) -> Result<(), DomainError>;

    /// Probe backend availability (readiness signal).
    async fn health_check(&self) -> Result<(), DomainError>;

    /// Backend name for logging and error messages.
    fn backend_name(&self) -> &'static str;
}
