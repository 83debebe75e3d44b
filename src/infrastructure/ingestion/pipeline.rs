//! Corpus ingestion pipeline

use std::path::Path;
use std::sync::Arc;

use crate::domain::chunk::ChunkRecord;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::ingestion::{ChunkingConfig, IngestOptions, IngestReceipt};
use crate::domain::vector_store::VectorStore;
use crate::domain::DomainError;

use super::chunker;

/// A source document before chunking.
#[derive(Debug, Clone)]
struct SourceDocument {
    text: String,
    source: String,
    section: String,
}

/// Loads documents, chunks them, embeds every chunk in one batch and
/// writes the records to the vector store.
#[derive(Debug)]
pub struct IngestionPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    defaults: ChunkingConfig,
}

impl IngestionPipeline {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        defaults: ChunkingConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            defaults,
        }
    }

    /// Ingest inline texts or a directory of `.txt` files.
    ///
    /// Producing zero chunks is not an error: the receipt reports zero
    /// inserted and neither the embedder nor the store is called.
    pub async fn ingest(
        &self,
        source_uri: &str,
        options: &IngestOptions,
    ) -> Result<IngestReceipt, DomainError> {
        let documents = self.collect_documents(source_uri, options)?;
        let config = options.effective_chunking(self.defaults);

        let mut rows: Vec<(String, String, String)> = Vec::new();
        for doc in &documents {
            for chunk_text in chunker::chunk(&doc.text, &config) {
                rows.push((chunk_text, doc.source.clone(), doc.section.clone()));
            }
        }

        if rows.is_empty() {
            tracing::info!(source_uri = source_uri, "Nothing to ingest");
            return Ok(IngestReceipt::completed(0));
        }

        let texts: Vec<String> = rows.iter().map(|(text, _, _)| text.clone()).collect();
        let vectors = self.embedder.embed(texts).await?;

        if vectors.len() != rows.len() {
            return Err(DomainError::provider(
                self.embedder.provider_name(),
                format!(
                    "Embedding count mismatch: {} vectors for {} chunks",
                    vectors.len(),
                    rows.len()
                ),
            ));
        }

        let records: Vec<ChunkRecord> = rows
            .into_iter()
            .zip(vectors)
            .map(|((text, source, section), vector)| ChunkRecord::new(text, source, section, vector))
            .collect();

        let outcome = self.store.insert(records).await?;
        self.store.flush().await?;

        tracing::info!(
            source_uri = source_uri,
            documents = documents.len(),
            inserted = outcome.inserted,
            "Ingestion completed"
        );

        Ok(IngestReceipt::completed(outcome.inserted))
    }

    fn collect_documents(
        &self,
        source_uri: &str,
        options: &IngestOptions,
    ) -> Result<Vec<SourceDocument>, DomainError> {
        if let Some(texts) = options.texts.as_ref().filter(|t| !t.is_empty()) {
            let source = options
                .source_name
                .clone()
                .unwrap_or_else(|| "inline".to_string());

            return Ok(texts
                .iter()
                .enumerate()
                .map(|(i, text)| SourceDocument {
                    text: text.clone(),
                    source: source.clone(),
                    section: format!("item-{}", i),
                })
                .collect());
        }

        let root = Path::new(source_uri);
        if root.is_dir() {
            return walk_txt_files(root);
        }

        Err(DomainError::validation(
            "ingest: either provide options.texts or a directory path with .txt files",
        ))
    }
}

/// Collect every `.txt` file under `root`, recursively.
///
/// Unreadable files are skipped with a warning; invalid UTF-8 is read
/// lossily. The source label is the path relative to `root`.
fn walk_txt_files(root: &Path) -> Result<Vec<SourceDocument>, DomainError> {
    let mut documents = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| {
            DomainError::internal(format!("Failed to read directory {}: {}", dir.display(), e))
        })?;

        let mut entries: Vec<_> = entries.filter_map(Result::ok).map(|e| e.path()).collect();
        entries.sort();

        for path in entries {
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|ext| ext == "txt") {
                match std::fs::read(&path) {
                    Ok(bytes) => {
                        let source = path
                            .strip_prefix(root)
                            .unwrap_or(&path)
                            .to_string_lossy()
                            .to_string();
                        documents.push(SourceDocument {
                            text: String::from_utf8_lossy(&bytes).into_owned(),
                            source,
                            section: String::new(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Skipping unreadable file"
                        );
                    }
                }
            }
        }
    }

    Ok(documents)
}
