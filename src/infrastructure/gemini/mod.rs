//! Gemini-shaped HTTP providers for completion and embedding

pub mod completion;
pub mod embedding;

pub use completion::GeminiCompletionProvider;
pub use embedding::GeminiEmbeddingProvider;

pub(crate) const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Trim long error bodies before they land in logs or error messages
pub(crate) fn truncate_body(body: &str) -> &str {
    let limit = 200;
    match body.char_indices().nth(limit) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
