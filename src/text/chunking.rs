//! Fixed-length character chunking
//!
//! Documents are cut into windows of at most `chunk_size` characters. Lengths
//! and offsets count Unicode scalar values, not bytes, so multi-byte text never
//! splits inside a character. With zero overlap the chunks tile the document
//! exactly.

use crate::config::ChunkingConfig;
use crate::error::{ChatdocError, Result};
use serde::{Deserialize, Serialize};

/// A contiguous slice of a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Position of the chunk in the document, starting at 0
    pub id: usize,

    /// The chunk text
    pub text: String,

    /// Character offset in the original document
    pub offset: usize,

    /// Length of the chunk in characters
    pub length: usize,
}

/// Splits documents into fixed-length chunks
#[derive(Debug, Clone)]
pub struct TextChunker {
    config: ChunkingConfig,
}

impl TextChunker {
    /// Create a chunker, rejecting settings that would never advance
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(ChatdocError::TextProcessing(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        if config.overlap >= config.chunk_size {
            return Err(ChatdocError::TextProcessing(format!(
                "overlap {} must be smaller than chunk_size {}",
                config.overlap, config.chunk_size
            )));
        }
        Ok(Self { config })
    }

    /// Create a chunker with default configuration
    pub fn with_default_config() -> Result<Self> {
        Self::new(ChunkingConfig::default())
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split `text` into chunks
    ///
    /// An empty document is an error: there is nothing to embed or retrieve.
    pub fn chunk_text(&self, text: &str) -> Result<Vec<Chunk>> {
        if text.is_empty() {
            return Err(ChatdocError::TextProcessing("document is empty".to_string()));
        }

        // Byte position of every character start, plus the end of the text.
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        let char_count = boundaries.len() - 1;

        let step = self.config.chunk_size - self.config.overlap;
        let mut chunks = Vec::with_capacity(char_count.div_ceil(step));
        let mut start = 0;

        loop {
            let end = std::cmp::min(start + self.config.chunk_size, char_count);
            chunks.push(Chunk {
                id: chunks.len(),
                text: text[boundaries[start]..boundaries[end]].to_string(),
                offset: start,
                length: end - start,
            });

            if end == char_count {
                break;
            }
            start += step;
        }

        log::debug!(
            "Split {} characters into {} chunks (size {}, overlap {})",
            char_count,
            chunks.len(),
            self.config.chunk_size,
            self.config.overlap
        );
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(chunk_size: usize, overlap: usize) -> TextChunker {
        TextChunker::new(ChunkingConfig { chunk_size, overlap }).unwrap()
    }

    #[test]
    fn test_fixed_length_chunks() {
        let chunks = chunker(4, 0).chunk_text("AAAABBBBCC").unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["AAAA", "BBBB", "CC"]);
        assert_eq!(chunks[2].offset, 8);
        assert_eq!(chunks[2].length, 2);
        assert_eq!(chunks[2].id, 2);
    }

    #[test]
    fn test_chunks_reassemble_document() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(37);
        for size in [1, 3, 7, 64, 1000, 5000] {
            let chunks = chunker(size, 0).chunk_text(&text).unwrap();
            let len = text.chars().count();
            assert_eq!(chunks.len(), len.div_ceil(size), "size {}", size);
            assert!(chunks.iter().all(|c| c.text.chars().count() <= size));
            let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn test_multibyte_characters() {
        let text = "héllo wörld 🤖🤖🤖";
        let chunks = chunker(5, 0).chunk_text(text).unwrap();
        assert_eq!(chunks.len(), text.chars().count().div_ceil(5));
        assert_eq!(chunks[0].text, "héllo");
        assert_eq!(chunks[1].text, " wörl");
        assert_eq!(chunks[2].text, "d 🤖🤖🤖");
        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_small_text() {
        let chunker = TextChunker::with_default_config().unwrap();
        let chunks = chunker.chunk_text("Short text").unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Short text");
    }

    #[test]
    fn test_overlap() {
        let chunks = chunker(4, 2).chunk_text("ABCDEFGH").unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["ABCD", "CDEF", "EFGH"]);
    }

    #[test]
    fn test_empty_document_rejected() {
        let result = TextChunker::with_default_config().unwrap().chunk_text("");
        assert!(matches!(result, Err(ChatdocError::TextProcessing(_))));
    }

    #[test]
    fn test_invalid_config() {
        assert!(TextChunker::new(ChunkingConfig { chunk_size: 0, overlap: 0 }).is_err());
        assert!(TextChunker::new(ChunkingConfig { chunk_size: 4, overlap: 4 }).is_err());
    }
}
