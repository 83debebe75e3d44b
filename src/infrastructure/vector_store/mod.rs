//! Vector store adapters

pub mod in_memory;
pub mod pgvector;

pub use in_memory::InMemoryVectorStore;
pub use pgvector::{PgvectorConfig, PgvectorStore};
