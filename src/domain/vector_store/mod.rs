//! Vector store domain: provider trait and result types

pub mod provider;

pub use provider::{InsertOutcome, VectorStore};
