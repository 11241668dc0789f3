//! Process-local caches over moka

pub mod embedding_cache;
pub mod response_cache;

pub use embedding_cache::EmbeddingCache;
pub use response_cache::ResponseCache;
