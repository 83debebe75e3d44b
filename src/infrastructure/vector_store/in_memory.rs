//! In-memory vector store for development and testing

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::chunk::{ChunkRecord, RetrievedContext};
use crate::domain::vector_store::{InsertOutcome, VectorStore};
use crate::domain::DomainError;

/// In-memory store ranking by exact cosine similarity.
///
/// Good enough for development without Postgres; everything is lost on
/// restart.
#[derive(Debug)]
pub struct InMemoryVectorStore {
    records: Arc<RwLock<Vec<ChunkRecord>>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn insert(&self, records: Vec<ChunkRecord>) -> Result<InsertOutcome, DomainError> {
        let inserted = records.len();
        self.records.write().await.extend(records);
        Ok(InsertOutcome::new(inserted))
    }

    async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u32,
    ) -> Result<Vec<RetrievedContext>, DomainError> {
        let records = self.records.read().await;

        let mut scored: Vec<(f32, &ChunkRecord)> = records
            .iter()
            .map(|record| (cosine_similarity(&vector, &record.vector), record))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let results = scored
            .into_iter()
            .take(top_k as usize)
            .map(|(score, record)| RetrievedContext {
                text: record.text.clone(),
                source: record.source.clone(),
                section: record.section.clone(),
                meta: record.meta.clone(),
                score,
            })
            .collect();

        Ok(results)
    }

    async fn flush(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_ranks_by_cosine_similarity() {
        let store = InMemoryVectorStore::new();
        store
            .insert(vec![
                ChunkRecord::new("orthogonal", "a.txt", "", vec![0.0, 1.0]),
                ChunkRecord::new("aligned", "b.txt", "", vec![1.0, 0.0]),
                ChunkRecord::new("diagonal", "c.txt", "", vec![1.0, 1.0]),
            ])
            .await
            .unwrap();

        let results = store.search(vec![1.0, 0.0], 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "aligned");
        assert!((results[0].score - 1.0).abs() < 1e-6);
        assert_eq!(results[1].text, "diagonal");
    }

    #[tokio::test]
    async fn test_search_empty_store() {
        let store = InMemoryVectorStore::new();
        let results = store.search(vec![1.0, 0.0], 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_insert_outcome_counts() {
        let store = InMemoryVectorStore::new();
        let outcome = store
            .insert(vec![ChunkRecord::new("a", "s", "", vec![1.0])])
            .await
            .unwrap();

        assert_eq!(outcome.inserted, 1);
        assert!(store.flush().await.is_ok());
        assert!(store.health_check().await.is_ok());
    }

    #[test]
    fn test_cosine_similarity_edge_cases() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    }
}
