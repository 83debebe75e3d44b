//! Application state shared across handlers

use std::sync::Arc;

use crate::domain::vector_store::VectorStore;
use crate::infrastructure::ingestion::IngestionPipeline;
use crate::infrastructure::pipeline::AskPipeline;

/// Everything constructed at startup and injected into the router.
///
/// Collaborators live behind `Arc` so the state clones cheaply per
/// request. The vector store handle is the same one the pipelines use;
/// the readiness probe borrows it directly.
#[derive(Clone, Debug)]
pub struct AppState {
    pub ask_pipeline: Arc<AskPipeline>,
    pub ingestion: Arc<IngestionPipeline>,
    pub vector_store: Arc<dyn VectorStore>,
}

impl AppState {
    pub fn new(
        ask_pipeline: Arc<AskPipeline>,
        ingestion: Arc<IngestionPipeline>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            ask_pipeline,
            ingestion,
            vector_store,
        }
    }
}
