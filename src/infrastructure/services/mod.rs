//! Pipeline services composing the domain traits

pub mod cached_embedder;
pub mod completion_client;
pub mod ingestion;
pub mod query;
pub mod retriever;

pub use cached_embedder::CachedEmbedder;
pub use completion_client::CompletionClient;
pub use ingestion::{IngestOutcome, IngestionService};
pub use query::QueryService;
pub use retriever::Retriever;
