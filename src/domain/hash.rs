//! Stable content hashing for cache keys and change detection

use sha2::{Digest, Sha256};

/// Hex SHA-256 digest of the exact input text.
///
/// No normalization is applied; callers that want whitespace-insensitive
/// keys must normalize before hashing. The same digest keys the embedding
/// cache, the response cache, and ingestion change detection.
pub fn content_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    hex::encode(digest)
}
