//! Document ingestion: chunk, embed, persist

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    chunk_words, content_hash, ChunkingConfig, ContextChunk, EmbeddingProvider, QaError,
    VectorStore,
};

/// What an ingest call did with the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// First load of this source
    Ingested { chunks: usize },
    /// Source existed with different content; old rows were replaced
    Replaced { chunks: usize },
    /// Source already holds this exact content; nothing written
    Unchanged,
}

/// Drives a document through chunking, embedding, and persistence.
///
/// Change detection is by content digest: an ingest of byte-identical text is
/// skipped, changed text replaces the source's rows wholesale. A partially
/// persisted load (batch failure mid-way) leaves fewer rows than the chunk
/// count; the digest check also compares counts, so retrying the same text
/// repairs it instead of skipping.
#[derive(Debug)]
pub struct IngestionService {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    chunking: ChunkingConfig,
    batch_size: usize,
}

impl IngestionService {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        chunking: ChunkingConfig,
        batch_size: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            chunking,
            batch_size: batch_size.max(1),
        }
    }

    /// Load one document. `text` must already be extracted plain text.
    pub async fn ingest(&self, source: &str, text: &str) -> Result<IngestOutcome, QaError> {
        if text.trim().is_empty() {
            return Err(QaError::extraction(format!(
                "document '{}' contained no text",
                source
            )));
        }

        self.chunking.validate()?;

        let digest = content_hash(text);
        let chunks = chunk_words(text, &self.chunking);

        let replacing = match self.store.source_digest(source).await? {
            Some(existing) if existing == digest => {
                if self.store.count_by_source(source).await? >= chunks.len() {
                    info!(source, "source unchanged, skipping ingest");
                    return Ok(IngestOutcome::Unchanged);
                }
                // Same content but fewer rows than expected: an earlier load
                // was interrupted mid-batch. Reload from scratch.
                warn!(source, "source partially loaded, re-ingesting");
                self.store.delete_by_source(source).await?;
                false
            }
            Some(_) => {
                let removed = self.store.delete_by_source(source).await?;
                info!(source, removed, "source content changed, replacing");
                true
            }
            None => false,
        };

        let total = chunks.len();
        let mut batch = Vec::with_capacity(self.batch_size.min(total));

        for content in chunks {
            let embedding = self.embedder.embed(&content).await?;
            batch.push(ContextChunk::new(source, content, embedding, digest.clone()));

            if batch.len() >= self.batch_size {
                self.store.upsert_chunks(std::mem::take(&mut batch)).await?;
            }
        }

        if !batch.is_empty() {
            self.store.upsert_chunks(batch).await?;
        }

        info!(source, chunks = total, "document ingested");

        Ok(if replacing {
            IngestOutcome::Replaced { chunks: total }
        } else {
            IngestOutcome::Ingested { chunks: total }
        })
    }
}
