//! Vector store contract and the chunk record it persists

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::QaError;

/// A chunk of document text with its embedding, as persisted by a store.
///
/// `content` is immutable once stored; rows are only removed when their
/// source is re-ingested with changed content. `source_digest` is the content
/// hash of the whole document the chunk came from and drives ingestion change
/// detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextChunk {
    pub id: Uuid,
    /// Originating document label (e.g. a file name)
    pub source: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub source_digest: String,
}

impl ContextChunk {
    pub fn new(
        source: impl Into<String>,
        content: impl Into<String>,
        embedding: Vec<f32>,
        source_digest: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            content: content.into(),
            embedding,
            source_digest: source_digest.into(),
        }
    }
}

/// Storage backend for context chunks and nearest-neighbor queries.
///
/// All embeddings handed to one store share a single dimensionality, fixed by
/// the embedding model. `query` orders by ascending distance under the
/// store's metric; tie order between equidistant chunks is store-defined and
/// callers must not depend on it.
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Persist a batch of chunks
    async fn upsert_chunks(&self, chunks: Vec<ContextChunk>) -> Result<(), QaError>;

    /// Up to `top_k` chunk contents, nearest first
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<String>, QaError>;

    /// Document digest recorded when `source` was ingested, if any rows exist
    async fn source_digest(&self, source: &str) -> Result<Option<String>, QaError>;

    /// Number of chunks stored for `source`
    async fn count_by_source(&self, source: &str) -> Result<usize, QaError>;

    /// Remove all chunks for `source`, returning how many were deleted
    async fn delete_by_source(&self, source: &str) -> Result<usize, QaError>;

    /// Total number of chunks in the store
    async fn count(&self) -> Result<usize, QaError>;
}
