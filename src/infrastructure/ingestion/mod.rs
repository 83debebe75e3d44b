//! Corpus ingestion: chunking and the load pipeline

pub mod chunker;
pub mod pipeline;

pub use pipeline::IngestionPipeline;
