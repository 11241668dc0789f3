//! Application configuration
//!
//! Values consumed by the pipeline; loaded from optional `config/default`
//! and `config/local` files, then `DOCQA__`-prefixed environment variables.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::ChunkingConfig;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QaConfig {
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalSettings,
    pub cache: CacheSettings,
    pub completion: CompletionSettings,
    pub gemini: GeminiSettings,
    pub database: DatabaseSettings,
    pub ingest: IngestSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of nearest chunks retrieved per question
    pub top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum embedding cache entries
    pub embedding_capacity: u64,
    /// Maximum response cache entries
    pub response_capacity: u64,
    /// Response cache entry lifetime in seconds
    pub response_ttl_secs: u64,
}

impl CacheSettings {
    pub fn response_ttl(&self) -> Duration {
        Duration::from_secs(self.response_ttl_secs)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            embedding_capacity: 1_000,
            response_capacity: 100,
            response_ttl_secs: 3_600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Total attempts per call, including the first
    pub max_retries: u32,
    /// First backoff delay in milliseconds
    pub initial_backoff_ms: u64,
    /// Backoff cap in milliseconds
    pub max_backoff_ms: u64,
}

impl CompletionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> crate::domain::RetryPolicy {
        crate::domain::RetryPolicy::new(
            self.max_retries,
            Duration::from_millis(self.initial_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
        )
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_retries: 3,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// API key appended to every request; empty means unconfigured
    pub api_key: String,
    /// Service base URL; overridden in tests to point at a mock server
    pub base_url: String,
    pub completion_model: String,
    pub embedding_model: String,
    /// Embedding dimensionality produced by `embedding_model`
    pub dimensions: usize,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            completion_model: "gemini-2.0-flash".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            dimensions: 768,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Postgres connection URL
    pub url: String,
    /// Maximum pooled connections
    pub pool_size: u32,
    /// Seconds to wait for a pooled connection before failing
    pub acquire_timeout_secs: u64,
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            pool_size: 20,
            acquire_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Chunks persisted per store round trip
    pub batch_size: usize,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self { batch_size: 64 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
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

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl QaConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("DOCQA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
