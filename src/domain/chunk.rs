//! Overlapping word-window chunking

use serde::{Deserialize, Serialize};

use crate::domain::QaError;

/// Configuration for chunking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Target chunk size in words
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in words
    pub overlap: usize,
}

impl ChunkingConfig {
    /// Create a new chunking configuration
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), QaError> {
        if self.chunk_size == 0 {
            return Err(QaError::configuration("chunk_size must be greater than 0"));
        }

        if self.overlap >= self.chunk_size {
            return Err(QaError::configuration(
                "overlap must be less than chunk_size",
            ));
        }

        Ok(())
    }

    /// Window stride implied by this configuration.
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 300,
            overlap: 50,
        }
    }
}

/// Split `text` into overlapping word windows.
///
/// Text at or under `chunk_size` words is returned untouched as a single
/// chunk. Longer text is windowed with stride `chunk_size - overlap`: the
/// trailing `overlap` words of each chunk reappear as the leading words of
/// the next, and the final chunk holds whatever remains. Pure function of its
/// inputs.
pub fn chunk_words(text: &str, config: &ChunkingConfig) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.len() <= config.chunk_size {
        return vec![text.to_string()];
    }

    let stride = config.stride();
    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let end = usize::min(start + config.chunk_size, words.len());
        chunks.push(words[start..end].join(" "));

        if end == words.len() {
            break;
        }

        start += stride;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{}", i)).collect()
    }

    #[test]
    fn test_small_text_single_chunk() {
        let text = "This is a small text that should be returned as a single chunk.";
        let config = ChunkingConfig::new(100, 20);

        let chunks = chunk_words(text, &config);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn test_text_exactly_chunk_size_single_chunk() {
        let words = words(30);
        let text = words.join(" ");
        let config = ChunkingConfig::new(30, 10);

        let chunks = chunk_words(&text, &config);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn test_large_text_window_positions() {
        let words = words(100);
        let text = words.join(" ");
        let config = ChunkingConfig::new(30, 10);

        let chunks = chunk_words(&text, &config);

        // Windows: [0,30) [20,50) [40,70) [60,90) [80,100)
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[0], words[0..30].join(" "));
        assert_eq!(chunks[1], words[20..50].join(" "));
        assert_eq!(chunks[4], words[80..100].join(" "));
    }

    #[test]
    fn test_adjacent_chunks_share_overlap() {
        let words = words(100);
        let text = words.join(" ");
        let config = ChunkingConfig::new(30, 10);

        let chunks = chunk_words(&text, &config);

        for pair in chunks.windows(2) {
            let prev: Vec<&str> = pair[0].split_whitespace().collect();
            let next: Vec<&str> = pair[1].split_whitespace().collect();
            assert_eq!(prev[prev.len() - config.overlap..], next[..config.overlap]);
        }
    }

    #[test]
    fn test_chunking_is_deterministic() {
        let text = words(250).join(" ");
        let config = ChunkingConfig::default();

        assert_eq!(chunk_words(&text, &config), chunk_words(&text, &config));
    }

    #[test]
    fn test_config_validation() {
        assert!(ChunkingConfig::new(100, 50).validate().is_ok());
        assert!(ChunkingConfig::new(0, 0).validate().is_err());
        assert!(ChunkingConfig::new(100, 100).validate().is_err());
        assert!(ChunkingConfig::new(100, 150).validate().is_err());
    }

    #[test]
    fn test_default_matches_expected_stride() {
        let config = ChunkingConfig::default();
        assert_eq!(config.chunk_size, 300);
        assert_eq!(config.overlap, 50);
        assert_eq!(config.stride(), 250);
    }
}
