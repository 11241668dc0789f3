//! Embedding provider wrapper with content-hash caching

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{content_hash, EmbeddingProvider, QaError};
use crate::infrastructure::cache::EmbeddingCache;

/// Caching decorator over any [`EmbeddingProvider`].
///
/// Keys are the SHA-256 of the exact input text. No normalization, so only
/// byte-identical text hits. A hit returns the stored vector without touching
/// the underlying provider. Two concurrent misses for the same text may both
/// compute; the second insert overwrites with an identical vector, which is
/// harmless.
#[derive(Debug)]
pub struct CachedEmbedder {
    inner: Arc<dyn EmbeddingProvider>,
    cache: EmbeddingCache,
}

impl CachedEmbedder {
    pub fn new(inner: Arc<dyn EmbeddingProvider>, cache: EmbeddingCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl EmbeddingProvider for CachedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, QaError> {
        let key = content_hash(text);

        if let Some(hit) = self.cache.get(&key).await {
            debug!(key = %key, "embedding cache hit");
            return Ok(hit.as_ref().clone());
        }

        let vector = self.inner.embed(text).await?;
        self.cache.insert(key, vector.clone()).await;

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }
}
