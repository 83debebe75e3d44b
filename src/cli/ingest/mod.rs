//! Ingest command - one-shot corpus load into the vector store

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::ingestion::IngestOptions;
use crate::infrastructure::logging::init_logging;

/// Arguments for the ingest command
#[derive(Args, Clone)]
pub struct IngestArgs {
    /// Directory containing .txt corpus files
    pub source: String,

    /// Window size in characters (overrides config)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overlap between windows in characters (overrides config)
    #[arg(long)]
    pub chunk_overlap: Option<usize>,
}

/// Run a single ingestion pass and print the receipt
pub async fn run(args: IngestArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging);

    let state = crate::create_app_state_with_config(&config).await?;

    let options = IngestOptions {
        chunk_size: args.chunk_size,
        chunk_overlap: args.chunk_overlap,
        ..Default::default()
    };

    info!(source = %args.source, "Starting ingestion");
    let receipt = state.ingestion.ingest(&args.source, &options).await?;

    println!(
        "job {} {}: {} chunks inserted",
        receipt.job_id, receipt.status, receipt.inserted
    );

    Ok(())
}
