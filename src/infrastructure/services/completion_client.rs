//! Resilient wrapper over a completion provider

use std::sync::Arc;

use tracing::warn;

use crate::domain::completion::{FALLBACK_NO_ANSWER, FALLBACK_SERVICE_UNAVAILABLE};
use crate::domain::{CompletionOutcome, CompletionProvider, QaError, RetryPolicy};
use crate::infrastructure::runtime::block_on;

/// Retry + fallback layer over any [`CompletionProvider`].
///
/// `complete` never errors: transient failures are retried per the policy,
/// then converted, like permanent failures, into one of the fixed apology
/// strings. The answer/fallback distinction is preserved in the returned
/// [`CompletionOutcome`] so the response cache can refuse fallbacks.
#[derive(Debug)]
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
    retry: RetryPolicy,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    /// Non-blocking completion round trip
    pub async fn complete(&self, question: &str, context: &str) -> CompletionOutcome {
        let result = self
            .retry
            .run(|| self.provider.complete(question, context))
            .await;

        match result {
            Ok(answer) => CompletionOutcome::Answer(answer),
            Err(err) => {
                warn!(
                    provider = self.provider.provider_name(),
                    error = %err,
                    "completion failed, returning fallback answer"
                );

                let fallback = match err {
                    QaError::CompletionTransient { .. } => FALLBACK_SERVICE_UNAVAILABLE,
                    _ => FALLBACK_NO_ANSWER,
                };
                CompletionOutcome::Fallback(fallback.to_string())
            }
        }
    }

    /// Blocking form of [`Self::complete`]; same policy, same fallbacks
    pub fn complete_blocking(&self, question: &str, context: &str) -> CompletionOutcome {
        block_on(self.complete(question, context))
    }
}
