//! Vector store backends

pub mod in_memory;
pub mod pgvector;

pub use in_memory::InMemoryVectorStore;
pub use pgvector::PgVectorStore;
