//! Embeddings and vector search for chatdoc-rs
//!
//! Embeddings come from a remote service; the index that searches them is
//! built in memory for a single request and dropped with it.

pub mod embedding;
pub mod search;

// Re-export main types and functions
pub use embedding::{Embedder, Embedding, OpenAIEmbedder};
pub use search::{DistanceMetric, SearchConfig, SearchResult, VectorSearchIndex};
