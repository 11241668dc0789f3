//! Postgres/pgvector store

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

use crate::config::DatabaseSettings;
use crate::domain::{ContextChunk, QaError, VectorStore};

/// Postgres-backed store using the pgvector extension.
///
/// Connections come from a bounded pool with an acquire timeout, so pool
/// exhaustion fails the query (and degrades retrieval) instead of hanging.
/// Nearest-neighbor ordering uses the L2 operator `<->`.
#[derive(Debug, Clone)]
pub struct PgVectorStore {
    pool: PgPool,
    dimensions: usize,
}

impl PgVectorStore {
    /// Connect with a bounded pool per the database settings
    pub async fn connect(settings: &DatabaseSettings, dimensions: usize) -> Result<Self, QaError> {
        if settings.url.is_empty() {
            return Err(QaError::configuration("database.url is not set"));
        }

        let pool = PgPoolOptions::new()
            .max_connections(settings.pool_size)
            .acquire_timeout(settings.acquire_timeout())
            .connect(&settings.url)
            .await
            .map_err(|e| QaError::storage(format!("Failed to connect to Postgres: {}", e)))?;

        Ok(Self { pool, dimensions })
    }

    /// Wrap an existing pool (tests, shared pools)
    pub fn with_pool(pool: PgPool, dimensions: usize) -> Self {
        Self { pool, dimensions }
    }

    /// Create the extension, table, and indexes if missing
    pub async fn ensure_schema(&self) -> Result<(), QaError> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await
            .map_err(|e| QaError::storage(format!("Failed to create vector extension: {}", e)))?;

        let create_table = format!(
            r#"
            CREATE TABLE IF NOT EXISTS context_chunks (
                id UUID PRIMARY KEY,
                source TEXT NOT NULL,
                content TEXT NOT NULL,
                embedding vector({}) NOT NULL,
                source_digest TEXT NOT NULL
            )
            "#,
            self.dimensions
        );

        sqlx::query(&create_table)
            .execute(&self.pool)
            .await
            .map_err(|e| QaError::storage(format!("Failed to create context_chunks: {}", e)))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_context_chunks_source ON context_chunks (source)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| QaError::storage(format!("Failed to create source index: {}", e)))?;

        // ivfflat needs rows to build meaningful lists; creation may fail on
        // an empty table depending on server version, which is non-fatal.
        let vector_index = "CREATE INDEX IF NOT EXISTS idx_context_chunks_embedding \
             ON context_chunks USING ivfflat (embedding vector_l2_ops)";
        let _ = sqlx::query(vector_index).execute(&self.pool).await;

        Ok(())
    }

    fn embedding_to_pgvector(embedding: &[f32]) -> String {
        let values: Vec<String> = embedding.iter().map(|v| v.to_string()).collect();
        format!("[{}]", values.join(","))
    }
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn upsert_chunks(&self, chunks: Vec<ContextChunk>) -> Result<(), QaError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| QaError::storage(format!("Failed to begin transaction: {}", e)))?;

        for chunk in &chunks {
            sqlx::query(
                r#"
                INSERT INTO context_chunks (id, source, content, embedding, source_digest)
                VALUES ($1, $2, $3, CAST($4 AS vector), $5)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(chunk.id)
            .bind(&chunk.source)
            .bind(&chunk.content)
            .bind(Self::embedding_to_pgvector(&chunk.embedding))
            .bind(&chunk.source_digest)
            .execute(&mut *tx)
            .await
            .map_err(|e| QaError::storage(format!("Failed to insert chunk: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| QaError::storage(format!("Failed to commit batch: {}", e)))
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<String>, QaError> {
        let rows = sqlx::query(
            r#"
            SELECT content FROM context_chunks
            ORDER BY embedding <-> CAST($1 AS vector)
            LIMIT $2
            "#,
        )
        .bind(Self::embedding_to_pgvector(embedding))
        .bind(top_k as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| QaError::storage(format!("Similarity query failed: {}", e)))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("content")
                    .map_err(|e| QaError::storage(format!("Failed to read content: {}", e)))
            })
            .collect()
    }

    async fn source_digest(&self, source: &str) -> Result<Option<String>, QaError> {
        let row = sqlx::query("SELECT source_digest FROM context_chunks WHERE source = $1 LIMIT 1")
            .bind(source)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| QaError::storage(format!("Digest lookup failed: {}", e)))?;

        row.map(|row| {
            row.try_get::<String, _>("source_digest")
                .map_err(|e| QaError::storage(format!("Failed to read digest: {}", e)))
        })
        .transpose()
    }

    async fn count_by_source(&self, source: &str) -> Result<usize, QaError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM context_chunks WHERE source = $1")
            .bind(source)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| QaError::storage(format!("Count by source failed: {}", e)))?;

        let count: i64 = row
            .try_get("n")
            .map_err(|e| QaError::storage(format!("Failed to read count: {}", e)))?;
        Ok(count as usize)
    }

    async fn delete_by_source(&self, source: &str) -> Result<usize, QaError> {
        let result = sqlx::query("DELETE FROM context_chunks WHERE source = $1")
            .bind(source)
            .execute(&self.pool)
            .await
            .map_err(|e| QaError::storage(format!("Delete by source failed: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }

    async fn count(&self) -> Result<usize, QaError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM context_chunks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| QaError::storage(format!("Count failed: {}", e)))?;

        let count: i64 = row
            .try_get("n")
            .map_err(|e| QaError::storage(format!("Failed to read count: {}", e)))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_literal_format() {
        let literal = PgVectorStore::embedding_to_pgvector(&[0.5, -1.0, 2.0]);
        assert_eq!(literal, "[0.5,-1,2]");
    }

    #[test]
    fn test_empty_embedding_literal() {
        assert_eq!(PgVectorStore::embedding_to_pgvector(&[]), "[]");
    }
}
