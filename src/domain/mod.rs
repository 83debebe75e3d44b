//! Domain layer: entities, errors and collaborator traits

pub mod answer;
pub mod chunk;
pub mod embedding;
pub mod error;
pub mod ingestion;
pub mod llm;
pub mod vector_store;
pub mod web_search;

pub use answer::{
    AskOutcome, Citation, Draft, FinalAnswer, Verdict, VerdictScores, WebEvidence,
    JUDGE_PARSE_ERROR,
};
pub use chunk::{ChunkRecord, RetrievedContext};
pub use embedding::EmbeddingProvider;
pub use error::DomainError;
pub use ingestion::{ChunkingConfig, IngestOptions, IngestReceipt};
pub use llm::{GenerationParams, LlmProvider};
pub use vector_store::{InsertOutcome, VectorStore};
pub use web_search::WebSearchProvider;
