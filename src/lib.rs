//! Legal RAG question-answering service
//!
//! A staged retrieval-augmented pipeline over a legal corpus:
//! - Sliding-window ingestion into a vector store (pgvector or in-memory)
//! - Retrieval, drafting, a quality-gate judge, web fallback, synthesis
//! - HTTP surface with /ask and /ingest plus health probes

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use config::{EmbeddingBackend, VectorStoreBackend};
use domain::embedding::EmbeddingProvider;
use domain::ingestion::ChunkingConfig;
use domain::llm::LlmProvider;
use domain::vector_store::VectorStore;
use infrastructure::embedding::{
    FallbackEmbeddingProvider, OllamaEmbeddingProvider, OpenAiEmbeddingProvider,
};
use infrastructure::http_client::{HttpClient, RetryPolicy};
use infrastructure::ingestion::IngestionPipeline;
use infrastructure::llm::OllamaProvider;
use infrastructure::pipeline::{AskPipeline, Drafter, Judge, Retriever, Synthesizer, WebFallback};
use infrastructure::vector_store::{InMemoryVectorStore, PgvectorConfig, PgvectorStore};
use infrastructure::web_search::FirecrawlProvider;
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state: providers, vector store and pipelines
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let llm = create_llm_provider(config);
    let embedder = create_embedding_provider(config)?;
    let store = create_vector_store(config).await?;
    let web_search = create_web_search_provider(config);

    let retriever =
        Retriever::new(embedder.clone(), store.clone()).with_top_k(config.retrieval.top_k);
    let drafter = Drafter::new(llm.clone(), config.generation.draft_model.clone());
    let judge = Judge::new(llm.clone(), config.generation.judge_model.clone());
    let web_fallback = WebFallback::new(web_search).with_limit(config.web_search.limit);
    let synthesizer = Synthesizer::new(llm, config.generation.synthesis_model.clone());

    let ask_pipeline = Arc::new(AskPipeline::new(
        retriever,
        drafter,
        judge,
        web_fallback,
        synthesizer,
    ));

    let chunking = ChunkingConfig::new(config.chunking.chunk_size, config.chunking.chunk_overlap);
    let ingestion = Arc::new(IngestionPipeline::new(embedder, store.clone(), chunking));

    Ok(AppState::new(ask_pipeline, ingestion, store))
}

/// Client for generation and embedding calls: separate connect/request
/// timeouts plus bounded retry on transient upstream statuses.
fn provider_http_client(config: &AppConfig) -> HttpClient {
    HttpClient::with_timeouts(
        Duration::from_secs(config.generation.connect_timeout_secs),
        Duration::from_secs(config.generation.request_timeout_secs),
    )
    .with_retry(RetryPolicy {
        max_retries: config.generation.max_retries,
        backoff_factor: config.generation.backoff_factor,
        retry_statuses: vec![502, 503, 504],
    })
}

fn create_llm_provider(config: &AppConfig) -> Arc<dyn LlmProvider> {
    info!(
        base_url = %config.generation.base_url,
        "Using Ollama generation backend"
    );
    Arc::new(
        OllamaProvider::new(provider_http_client(config))
            .with_base_url(config.generation.base_url.clone()),
    )
}

fn create_embedding_provider(config: &AppConfig) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    let primary = create_embedding_backend(config, &config.embedding.backend)?;

    let fallback = match &config.embedding.fallback {
        Some(backend) if *backend != config.embedding.backend => {
            Some(create_embedding_backend(config, backend)?)
        }
        _ => None,
    };

    match fallback {
        Some(fallback) => {
            info!(
                primary = primary.provider_name(),
                fallback = fallback.provider_name(),
                "Embedding fallback chain configured"
            );
            Ok(Arc::new(FallbackEmbeddingProvider::new(
                primary,
                Some(fallback),
            )))
        }
        None => {
            info!(provider = primary.provider_name(), "Embedding backend ready");
            Ok(primary)
        }
    }
}

fn create_embedding_backend(
    config: &AppConfig,
    backend: &EmbeddingBackend,
) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    match backend {
        EmbeddingBackend::Openai => {
            let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
                anyhow::anyhow!("OPENAI_API_KEY is required for the openai embedding backend")
            })?;
            Ok(Arc::new(
                OpenAiEmbeddingProvider::new(provider_http_client(config), api_key)
                    .with_model(config.embedding.openai_model.clone()),
            ))
        }
        EmbeddingBackend::Ollama => Ok(Arc::new(
            OllamaEmbeddingProvider::new(provider_http_client(config))
                .with_base_url(config.generation.base_url.clone())
                .with_model(config.embedding.ollama_model.clone()),
        )),
    }
}

async fn create_vector_store(config: &AppConfig) -> anyhow::Result<Arc<dyn VectorStore>> {
    match config.vector_store.backend {
        VectorStoreBackend::Memory => {
            info!("Using in-memory vector store");
            Ok(Arc::new(InMemoryVectorStore::new()))
        }
        VectorStoreBackend::Pgvector => {
            let database_url = std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

            info!("Connecting to PostgreSQL...");
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            let store = PgvectorStore::new(
                pool,
                PgvectorConfig::new(config.embedding.dimensions)
                    .with_table_name(config.vector_store.table.clone()),
            );
            store.ensure_table().await?;
            info!(table = %config.vector_store.table, "Vector table ready");

            Ok(Arc::new(store))
        }
    }
}

fn create_web_search_provider(
    config: &AppConfig,
) -> Arc<dyn domain::web_search::WebSearchProvider> {
    let api_key = std::env::var("FIRECRAWL_API_KEY").ok();
    if api_key.is_none() {
        info!("FIRECRAWL_API_KEY not set; web fallback searches will fail soft");
    }

    let client = HttpClient::with_timeout(Duration::from_secs(config.web_search.timeout_secs));
    Arc::new(
        FirecrawlProvider::new(client, api_key).with_base_url(config.web_search.base_url.clone()),
    )
}
