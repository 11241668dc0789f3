use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum QaError {
    #[error("Ingestion error: {message}")]
    Ingestion { message: String },

    #[error("Extraction error: {message}")]
    Extraction { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Embedding error: {message}")]
    Embedding { message: String },

    #[error("Transient completion failure: {message}")]
    CompletionTransient { message: String },

    #[error("Permanent completion failure: {message}")]
    CompletionPermanent { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },
}

impl QaError {
    pub fn ingestion(message: impl Into<String>) -> Self {
        Self::Ingestion {
            message: message.into(),
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    pub fn completion_transient(message: impl Into<String>) -> Self {
        Self::CompletionTransient {
            message: message.into(),
        }
    }

    pub fn completion_permanent(message: impl Into<String>) -> Self {
        Self::CompletionPermanent {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Whether a retry can reasonably be expected to succeed.
    ///
    /// Only completion-service failures participate in the retry loop;
    /// everything else is surfaced (ingestion) or degraded (retrieval).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::CompletionTransient { .. })
    }
}
