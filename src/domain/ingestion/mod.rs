//! Ingestion domain: chunking configuration, request options, receipts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Window configuration for the sliding-window chunker.
///
/// `chunk_size == 0` disables windowing: the whole text becomes a single
/// chunk. An overlap at or above the chunk size is legal; the chunker
/// still advances at least one window per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Window size in characters
    pub chunk_size: usize,
    /// Characters shared between consecutive windows
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 100,
        }
    }
}

/// Per-request ingestion options.
///
/// When `texts` is present the entries are ingested directly and the
/// source directory is never touched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestOptions {
    /// Inline documents to ingest instead of reading the source directory
    #[serde(default)]
    pub texts: Option<Vec<String>>,
    /// Source label for inline documents (defaults to "inline")
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub chunk_size: Option<usize>,
    #[serde(default)]
    pub chunk_overlap: Option<usize>,
}

impl IngestOptions {
    /// Resolve the chunking config: request options override `defaults`.
    pub fn effective_chunking(&self, defaults: ChunkingConfig) -> ChunkingConfig {
        ChunkingConfig {
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
            chunk_overlap: self.chunk_overlap.unwrap_or(defaults.chunk_overlap),
        }
    }
}

/// Receipt for a completed ingestion run.
///
/// Ingestion is synchronous; the job id is an audit handle, not a poll
/// handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReceipt {
    pub job_id: Uuid,
    pub status: String,
    pub inserted: usize,
    pub created_at: DateTime<Utc>,
}

impl IngestReceipt {
    pub fn completed(inserted: usize) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            status: "completed".to_string(),
            inserted,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunking_defaults() {
        let config = ChunkingConfig::default();
        assert_eq!(config.chunk_size, 800);
        assert_eq!(config.chunk_overlap, 100);
    }

    #[test]
    fn test_options_override_defaults() {
        let options = IngestOptions {
            chunk_size: Some(200),
            ..Default::default()
        };

        let effective = options.effective_chunking(ChunkingConfig::default());

        assert_eq!(effective.chunk_size, 200);
        assert_eq!(effective.chunk_overlap, 100);
    }

    #[test]
    fn test_receipt_completed() {
        let receipt = IngestReceipt::completed(42);
        assert_eq!(receipt.status, "completed");
        assert_eq!(receipt.inserted, 42);
    }

    #[test]
    fn test_options_deserialize_all_optional() {
        let options: IngestOptions = serde_json::from_str("{}").unwrap();
        assert!(options.texts.is_none());
        assert!(options.source_name.is_none());

        let options: IngestOptions =
            serde_json::from_str(r#"{"texts": ["a"], "source_name": "manual"}"#).unwrap();
        assert_eq!(options.texts.unwrap().len(), 1);
        assert_eq!(options.source_name.unwrap(), "manual");
    }
}
