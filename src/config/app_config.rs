use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub chunking: ChunkingSettings,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub web_search: WebSearchSettings,
    #[serde(default)]
    pub vector_store: VectorStoreSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RetrievalConfig {
    /// Nearest neighbors fetched per query
    pub top_k: u32,
}

/// Default chunker window; per-request options can override both fields.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    #[default]
    Openai,
    Ollama,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    pub backend: EmbeddingBackend,
    /// Backend tried once when the primary fails; ignored when equal to
    /// the primary
    #[serde(default)]
    pub fallback: Option<EmbeddingBackend>,
    pub openai_model: String,
    pub ollama_model: String,
    /// Vector width the store schema is created with
    pub dimensions: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    /// Ollama-compatible endpoint serving /api/generate
    pub base_url: String,
    pub draft_model: String,
    pub judge_model: String,
    pub synthesis_model: String,
    pub connect_timeout_secs: u64,
    /// Generous overall timeout; generation runs far longer than setup
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_factor: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSearchSettings {
    pub base_url: String,
    /// Results requested per fallback search
    pub limit: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VectorStoreBackend {
    /// In-process store for development and tests
    Memory,
    #[default]
    Pgvector,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VectorStoreSettings {
    pub backend: VectorStoreBackend,
    pub table: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 20 }
    }
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 100,
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            fallback: None,
            openai_model: "text-embedding-3-small".to_string(),
            ollama_model: "nomic-embed-text".to_string(),
            dimensions: 1536,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            draft_model: "mistral".to_string(),
            judge_model: "mistral".to_string(),
            synthesis_model: "mistral".to_string(),
            connect_timeout_secs: 15,
            request_timeout_secs: 300,
            max_retries: 2,
            backoff_factor: 1.5,
        }
    }
}

impl Default for WebSearchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.firecrawl.dev".to_string(),
            limit: 3,
            timeout_secs: 25,
        }
    }
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            backend: VectorStoreBackend::default(),
            table: "legal_chunks".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.retrieval.top_k, 20);
        assert_eq!(config.chunking.chunk_size, 800);
        assert_eq!(config.chunking.chunk_overlap, 100);
        assert_eq!(config.embedding.backend, EmbeddingBackend::Openai);
        assert!(config.embedding.fallback.is_none());
        assert_eq!(config.embedding.dimensions, 1536);
        assert_eq!(config.generation.draft_model, "mistral");
        assert_eq!(config.generation.max_retries, 2);
        assert_eq!(config.web_search.base_url, "https://api.firecrawl.dev");
        assert_eq!(config.web_search.limit, 3);
        assert_eq!(config.vector_store.backend, VectorStoreBackend::Pgvector);
        assert_eq!(config.vector_store.table, "legal_chunks");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let json = serde_json::json!({
            "server": {"host": "127.0.0.1", "port": 9000},
            "vector_store": {"backend": "memory", "table": "legal_chunks"}
        });

        let config: AppConfig = serde_json::from_value(json).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.vector_store.backend, VectorStoreBackend::Memory);
        assert_eq!(config.retrieval.top_k, 20);
        assert_eq!(config.embedding.ollama_model, "nomic-embed-text");
    }

    #[test]
    fn test_backend_enums_parse_lowercase() {
        let embedding: EmbeddingBackend = serde_json::from_str(r#""ollama""#).unwrap();
        assert_eq!(embedding, EmbeddingBackend::Ollama);

        let store: VectorStoreBackend = serde_json::from_str(r#""pgvector""#).unwrap();
        assert_eq!(store, VectorStoreBackend::Pgvector);

        let format: LogFormat = serde_json::from_str(r#""json""#).unwrap();
        assert!(matches!(format, LogFormat::Json));
    }
}
