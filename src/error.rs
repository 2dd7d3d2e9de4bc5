//! Error types for chatdoc-rs
//!
//! This module provides the error type shared by the chat orchestrator, the
//! document QA pipeline, and the configuration layer.

use async_openai::error::OpenAIError;
use thiserror::Error;

/// Main error type for chatdoc operations
#[derive(Error, Debug)]
pub enum ChatdocError {
    /// Text processing errors
    #[error("Text processing error: {0}")]
    TextProcessing(String),

    /// Uploaded document could not be decoded
    #[error("Document error: {0}")]
    Document(String),

    /// Embedding service errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector search errors
    #[error("Search error: {0}")]
    Search(String),

    /// Language model errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Missing or malformed credentials
    #[error("Credential error: {0}")]
    Credential(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors returned by the OpenAI client
    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] OpenAIError),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(String),
}

/// Result type alias for chatdoc operations
pub type Result<T> = std::result::Result<T, ChatdocError>;

impl From<pdf_extract::OutputError> for ChatdocError {
    fn from(err: pdf_extract::OutputError) -> Self {
        ChatdocError::Document(err.to_string())
    }
}
