//! CLI module for the legal RAG service
//!
//! Provides subcommands for the two operational modes:
//! - `serve`: run the HTTP question-answering service
//! - `ingest`: one-shot corpus load into the vector store

pub mod ingest;
pub mod serve;

use clap::{Parser, Subcommand};

/// Legal RAG service - staged retrieval-augmented question answering
#[derive(Parser)]
#[command(name = "lexrag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Ingest a corpus file or directory and exit
    Ingest(ingest::IngestArgs),
}
