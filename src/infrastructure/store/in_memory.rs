//! In-memory vector store (brute-force scan)

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{ContextChunk, QaError, VectorStore};

/// Brute-force in-memory store.
///
/// Scans every chunk per query under L2 distance, the same metric as the
/// Postgres backend, so the two stay interchangeable. Suitable for tests and
/// small corpora.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    chunks: RwLock<Vec<ContextChunk>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert_chunks(&self, chunks: Vec<ContextChunk>) -> Result<(), QaError> {
        self.chunks.write().await.extend(chunks);
        Ok(())
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<String>, QaError> {
        let chunks = self.chunks.read().await;

        let mut scored: Vec<(f32, &ContextChunk)> = chunks
            .iter()
            .filter(|chunk| chunk.embedding.len() == embedding.len())
            .map(|chunk| (Self::l2_distance(&chunk.embedding, embedding), chunk))
            .collect();

        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(_, chunk)| chunk.content.clone())
            .collect())
    }

    async fn source_digest(&self, source: &str) -> Result<Option<String>, QaError> {
        let chunks = self.chunks.read().await;
        Ok(chunks
            .iter()
            .find(|chunk| chunk.source == source)
            .map(|chunk| chunk.source_digest.clone()))
    }

    async fn count_by_source(&self, source: &str) -> Result<usize, QaError> {
        let chunks = self.chunks.read().await;
        Ok(chunks.iter().filter(|chunk| chunk.source == source).count())
    }

    async fn delete_by_source(&self, source: &str) -> Result<usize, QaError> {
        let mut chunks = self.chunks.write().await;
        let initial_len = chunks.len();

        chunks.retain(|chunk| chunk.source != source);

        Ok(initial_len - chunks.len())
    }

    async fn count(&self) -> Result<usize, QaError> {
        Ok(self.chunks.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(source: &str, content: &str, embedding: Vec<f32>) -> ContextChunk {
        ContextChunk::new(source, content, embedding, "digest")
    }

    #[tokio::test]
    async fn test_query_orders_nearest_first() {
        let store = InMemoryVectorStore::new();
        store
            .upsert_chunks(vec![
                chunk("doc", "far", vec![10.0, 10.0]),
                chunk("doc", "near", vec![1.0, 1.0]),
                chunk("doc", "middle", vec![5.0, 5.0]),
            ])
            .await
            .unwrap();

        let results = store.query(&[0.0, 0.0], 3).await.unwrap();

        assert_eq!(results, vec!["near", "middle", "far"]);
    }

    #[tokio::test]
    async fn test_query_respects_top_k() {
        let store = InMemoryVectorStore::new();
        store
            .upsert_chunks(vec![
                chunk("doc", "a", vec![1.0]),
                chunk("doc", "b", vec![2.0]),
                chunk("doc", "c", vec![3.0]),
            ])
            .await
            .unwrap();

        let results = store.query(&[0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_query_empty_store() {
        let store = InMemoryVectorStore::new();
        assert!(store.query(&[0.0], 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_source_digest_roundtrip() {
        let store = InMemoryVectorStore::new();
        store
            .upsert_chunks(vec![ContextChunk::new("doc", "text", vec![0.0], "abc123")])
            .await
            .unwrap();

        assert_eq!(
            store.source_digest("doc").await.unwrap(),
            Some("abc123".to_string())
        );
        assert_eq!(store.source_digest("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_by_source() {
        let store = InMemoryVectorStore::new();
        store
            .upsert_chunks(vec![
                chunk("keep", "a", vec![0.0]),
                chunk("drop", "b", vec![0.0]),
                chunk("drop", "c", vec![0.0]),
            ])
            .await
            .unwrap();

        assert_eq!(store.delete_by_source("drop").await.unwrap(), 2);
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.count_by_source("drop").await.unwrap(), 0);
        assert_eq!(store.count_by_source("keep").await.unwrap(), 1);
    }
}
