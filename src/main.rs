use clap::Parser;
use lexrag::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Ingest(args) => cli::ingest::run(args).await,
    }
}
