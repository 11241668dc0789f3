//! Public question-answering entry point

use tracing::{debug, info};

use crate::domain::content_hash;
use crate::infrastructure::cache::ResponseCache;
use crate::infrastructure::runtime::block_on;
use crate::infrastructure::services::{CompletionClient, Retriever};

/// The query orchestrator: response cache, retrieval, completion.
///
/// The public operations are infallible by construction: the retriever
/// degrades internally and the completion client converts every failure into
/// a fixed fallback string, so callers always receive *some* answer.
#[derive(Debug)]
pub struct QueryService {
    retriever: Retriever,
    completion: CompletionClient,
    response_cache: ResponseCache,
    top_k: usize,
}

impl QueryService {
    pub fn new(
        retriever: Retriever,
        completion: CompletionClient,
        response_cache: ResponseCache,
        top_k: usize,
    ) -> Self {
        Self {
            retriever,
            completion,
            response_cache,
            top_k,
        }
    }

    /// Answer a question (non-blocking form).
    ///
    /// Cache hit short-circuits retrieval and completion entirely. Only real
    /// answers are written back; fallback answers are returned but never
    /// cached, so a failure cannot poison later identical questions.
    pub async fn answer_async(&self, question: &str) -> String {
        let key = content_hash(question);

        if let Some(answer) = self.response_cache.get(&key).await {
            debug!(key = %key, "response cache hit");
            return answer;
        }

        let context = self.retriever.retrieve(question, self.top_k).await;
        if context.is_empty() {
            debug!("answering without grounding context");
        }

        let outcome = self.completion.complete(question, &context).await;

        if outcome.is_answer() {
            let answer = outcome.into_text();
            self.response_cache.insert(key, answer.clone()).await;
            info!("question answered");
            answer
        } else {
            outcome.into_text()
        }
    }

    /// Answer a question (blocking form).
    ///
    /// Thin adapter over [`Self::answer_async`]; must be called from outside
    /// the async runtime or from a multi-thread runtime worker.
    pub fn answer(&self, question: &str) -> String {
        block_on(self.answer_async(question))
    }
}
