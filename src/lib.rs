//! docqa
//!
//! Document-grounded question answering over a private corpus:
//! - Overlapping word-window chunking with per-source change detection
//! - Embedding + response caches shared across concurrent requests
//! - pgvector nearest-neighbor retrieval with graceful degradation
//! - Resilient Gemini completion client (retry/backoff, fail-soft answers)

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::QaConfig;

use std::sync::Arc;

use domain::{CompletionProvider, EmbeddingProvider, VectorStore};
use infrastructure::cache::{EmbeddingCache, ResponseCache};
use infrastructure::gemini::{GeminiCompletionProvider, GeminiEmbeddingProvider};
use infrastructure::http_client::HttpClient;
use infrastructure::services::{
    CachedEmbedder, CompletionClient, IngestionService, QueryService, Retriever,
};
use infrastructure::store::PgVectorStore;
use tracing::info;

/// The wired pipeline: one-shot ingestion plus the hot query path
pub struct Services {
    pub ingestion: IngestionService,
    pub query: QueryService,
}

/// Build the production pipeline from configuration.
///
/// Connects the bounded Postgres pool, ensures the pgvector schema, and wires
/// the Gemini providers through the shared caches. The embedding cache is
/// shared between ingestion and retrieval, so a question repeating a chunk's
/// exact text never re-embeds.
pub async fn build_services(config: &QaConfig) -> anyhow::Result<Services> {
    if config.gemini.api_key.is_empty() {
        anyhow::bail!("gemini.api_key is not set (DOCQA__GEMINI__API_KEY)");
    }
    config.chunking.validate()?;

    let http = HttpClient::with_timeout(config.completion.timeout());

    let store = PgVectorStore::connect(&config.database, config.gemini.dimensions).await?;
    store.ensure_schema().await?;
    info!(chunks = store.count().await?, "vector store ready");
    let store: Arc<dyn VectorStore> = Arc::new(store);

    let embedding_provider: Arc<dyn EmbeddingProvider> =
        Arc::new(GeminiEmbeddingProvider::with_base_url(
            http.clone(),
            config.gemini.api_key.as_str(),
            config.gemini.embedding_model.as_str(),
            config.gemini.dimensions,
            config.gemini.base_url.as_str(),
        ));
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(CachedEmbedder::new(
        embedding_provider,
        EmbeddingCache::new(config.cache.embedding_capacity),
    ));

    let completion_provider: Arc<dyn CompletionProvider> =
        Arc::new(GeminiCompletionProvider::with_base_url(
            http,
            config.gemini.api_key.as_str(),
            config.gemini.completion_model.as_str(),
            config.gemini.base_url.as_str(),
        ));
    let completion =
        CompletionClient::new(completion_provider, config.completion.retry_policy());

    let retriever = Retriever::new(embedder.clone(), store.clone());
    let response_cache = ResponseCache::new(
        config.cache.response_capacity,
        config.cache.response_ttl(),
    );
    let query = QueryService::new(retriever, completion, response_cache, config.retrieval.top_k);

    let ingestion = IngestionService::new(
        embedder,
        store,
        config.chunking.clone(),
        config.ingest.batch_size,
    );

    Ok(Services { ingestion, query })
}
