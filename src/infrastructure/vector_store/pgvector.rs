//! pgvector-backed chunk store

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::domain::chunk::{ChunkRecord, RetrievedContext};
use crate::domain::vector_store::{InsertOutcome, VectorStore};
use crate::domain::DomainError;

/// Configuration for the pgvector store
#[derive(Debug, Clone)]
pub struct PgvectorConfig {
    /// Embedding dimensions
    pub dimensions: u32,
    /// Table name for storing chunks
    pub table_name: String,
}

impl PgvectorConfig {
    pub fn new(dimensions: u32) -> Self {
        Self {
            dimensions,
            table_name: "legal_chunks".to_string(),
        }
    }

    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }
}

/// pgvector-based chunk store using cosine distance.
#[derive(Debug)]
pub struct PgvectorStore {
    pool: PgPool,
    config: PgvectorConfig,
}

impl PgvectorStore {
    pub fn new(pool: PgPool, config: PgvectorConfig) -> Self {
        Self { pool, config }
    }

    /// Ensure the extension, table and index exist. Idempotent.
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::vector_store(format!("Failed to create vector extension: {}", e))
            })?;

        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                text TEXT NOT NULL,
                source VARCHAR(1000) NOT NULL DEFAULT '',
                section VARCHAR(255) NOT NULL DEFAULT '',
                meta JSONB NOT NULL DEFAULT '{{}}',
                embedding vector({}) NOT NULL
            )
            "#,
            self.config.table_name, self.config.dimensions
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::vector_store(format!("Failed to create table: {}", e)))?;

        // IVFFlat needs data to build, so a failure here is not fatal
        let vector_index = format!(
            "CREATE INDEX IF NOT EXISTS idx_{}_embedding ON {} USING ivfflat (embedding vector_cosine_ops)",
            self.config.table_name, self.config.table_name
        );
        let _ = sqlx::query(&vector_index).execute(&self.pool).await;

        Ok(())
    }

    fn embedding_to_pgvector(embedding: &[f32]) -> String {
        let values: Vec<String> = embedding.iter().map(|v| v.to_string()).collect();
        format!("[{}]", values.join(","))
    }
}

#[async_trait]
impl VectorStore for PgvectorStore {
    async fn insert(&self, records: Vec<ChunkRecord>) -> Result<InsertOutcome, DomainError> {
        let query = format!(
            "INSERT INTO {} (text, source, section, meta, embedding) VALUES ($1, $2, $3, $4, $5::vector)",
            self.config.table_name
        );

        let inserted = records.len();
        for record in records {
            let meta = serde_json::to_value(&record.meta)
                .map_err(|e| DomainError::vector_store(format!("Invalid meta: {}", e)))?;
            let embedding = Self::embedding_to_pgvector(&record.vector);

            sqlx::query(&query)
                .bind(&record.text)
                .bind(&record.source)
                .bind(&record.section)
                .bind(&meta)
                .bind(&embedding)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::vector_store(format!("Insert failed: {}", e)))?;
        }

        tracing::debug!(
            table = %self.config.table_name,
            inserted = inserted,
            "Inserted chunk records"
        );

        Ok(InsertOutcome::new(inserted))
    }

    async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u32,
    ) -> Result<Vec<RetrievedContext>, DomainError> {
        let embedding = Self::embedding_to_pgvector(&vector);
        let query = format!(
            r#"
            SELECT
                text,
                source,
                section,
                meta,
                1 - (embedding <=> '{}') AS score
            FROM {}
            ORDER BY embedding <=> '{}'
            LIMIT {}
            "#,
            embedding, self.config.table_name, embedding, top_k
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(table = %self.config.table_name, error = %e, "Search failed");
                DomainError::vector_store(format!("Search failed: {}", e))
            })?;

        let results = rows
            .into_iter()
            .map(|row| {
                let meta_value: serde_json::Value = row.get("meta");
                let meta: HashMap<String, serde_json::Value> =
                    serde_json::from_value(meta_value).unwrap_or_default();
                let score: f64 = row.get("score");

                RetrievedContext {
                    text: row.get("text"),
                    source: row.get("source"),
                    section: row.get("section"),
                    meta,
                    score: score as f32,
                }
            })
            .collect();

        Ok(results)
    }

    async fn flush(&self) -> Result<(), DomainError> {
        // Rows are visible as soon as each insert commits
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::vector_store(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "pgvector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_to_pgvector_format() {
        let rendered = PgvectorStore::embedding_to_pgvector(&[0.1, -0.2, 1.0]);
        assert_eq!(rendered, "[0.1,-0.2,1]");
    }

    #[test]
    fn test_embedding_to_pgvector_empty() {
        assert_eq!(PgvectorStore::embedding_to_pgvector(&[]), "[]");
    }

    #[test]
    fn test_config_defaults() {
        let config = PgvectorConfig::new(1536);
        assert_eq!(config.dimensions, 1536);
        assert_eq!(config.table_name, "legal_chunks");

        let config = PgvectorConfig::new(768).with_table_name("test_chunks");
        assert_eq!(config.table_name, "test_chunks");
    }
}
