//! Infrastructure layer - External service implementations

pub mod embedding;
pub mod http_client;
pub mod ingestion;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod vector_store;
pub mod web_search;
