//! Completion provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::QaError;

/// Trait for completion-service providers.
///
/// `complete` is a single attempt with typed errors; retry, backoff, and
/// fallback conversion live in the completion client wrapping this trait.
/// Errors must be classified: transient failures (timeout, connection, 429,
/// 5xx) as [`QaError::CompletionTransient`], everything else as
/// [`QaError::CompletionPermanent`].
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug {
    /// One grounded completion attempt
    async fn complete(&self, question: &str, context: &str) -> Result<String, QaError>;

    /// Provider name for logs
    fn provider_name(&self) -> &'static str;
}
