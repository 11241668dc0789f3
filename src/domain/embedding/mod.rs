//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::QaError;

/// Trait for embedding providers.
///
/// Implementations map text to a fixed-length float vector. The mapping is
/// assumed deterministic for identical input text; the embedding cache relies
/// on this.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed the given text into a `dimensions()`-length vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>, QaError>;

    /// Dimensionality of every vector this provider produces
    fn dimensions(&self) -> usize;
}
