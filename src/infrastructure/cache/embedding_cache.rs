//! Capacity-bounded cache of computed embeddings

use std::sync::Arc;

use moka::future::Cache as MokaCache;

/// Concurrent cache from content hash to embedding vector.
///
/// Entries are never invalidated: text-to-embedding is a pure function, so
/// the cache is correctness-preserving and only the capacity bound matters.
/// Values are shared via `Arc` so a hit never copies the vector inside the
/// cache itself.
#[derive(Debug)]
pub struct EmbeddingCache {
    cache: MokaCache<String, Arc<Vec<f32>>>,
}

impl EmbeddingCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: MokaCache::builder().max_capacity(capacity).build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<f32>>> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, Arc::new(embedding)).await;
    }

    /// Entry count after flushing pending maintenance
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}
