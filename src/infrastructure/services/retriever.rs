//! Context retrieval for incoming questions

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{EmbeddingProvider, VectorStore};

/// Separator between retrieved chunk contents in the context string
const CONTEXT_SEPARATOR: &str = "\n\n";

/// Turns a question into a grounding context string.
///
/// Every failure on this path degrades to an empty context: the question
/// still reaches the completion service, just without grounding. Failures
/// are logged, never propagated.
#[derive(Debug)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Nearest `top_k` chunk contents joined in retrieval order, or empty
    pub async fn retrieve(&self, question: &str, top_k: usize) -> String {
        let embedding = match self.embedder.embed(question).await {
            Ok(embedding) => embedding,
            Err(err) => {
                warn!(error = %err, "question embedding failed, continuing without context");
                return String::new();
            }
        };

        match self.store.query(&embedding, top_k).await {
            Ok(contents) => {
                if contents.is_empty() {
                    debug!("vector store returned no matches");
                }
                contents.join(CONTEXT_SEPARATOR)
            }
            Err(err) => {
                warn!(error = %err, "vector store query failed, continuing without context");
                String::new()
            }
        }
    }
}
