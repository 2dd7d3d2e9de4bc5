//! Document decoding and chunking for chatdoc-rs
//!
//! This module turns uploaded files into text and splits that text into the
//! chunks the retrieval pipeline embeds.

pub mod chunking;
pub mod document;

// Re-export main types and functions
pub use chunking::{Chunk, TextChunker};
pub use document::{UploadedFile, decode};
