//! Configuration for chatdoc-rs
//!
//! All settings have defaults matching the hosted OpenAI setup. A JSON file can
//! override any subset of them, and the CLI overrides the file.

use crate::error::{ChatdocError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// System prompt that seeds every chat session
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chat: ChatConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub api: ApiConfig,
}

/// Chat completion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Model used for chat completions
    pub model: String,

    /// Content of the leading system message
    pub system_prompt: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Document splitting settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 0,
        }
    }
}

/// Retrieval-augmented answering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of chunks stuffed into the prompt
    pub top_k: usize,

    /// Model used to embed chunks and queries
    pub embedding_model: String,

    /// Model used to answer the stuffed prompt
    pub completion_model: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            embedding_model: "text-embedding-ada-002".to_string(),
            completion_model: "gpt-3.5-turbo".to_string(),
        }
    }
}

/// Remote endpoint settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL for OpenAI-compatible APIs (e.g. "http://localhost:11434/v1")
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from a JSON file, filling gaps with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check that the settings can drive a pipeline
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(ChatdocError::Config("chunk_size must be greater than 0".to_string()));
        }
        if self.chunking.overlap >= self.chunking.chunk_size {
            return Err(ChatdocError::Config(format!(
                "overlap {} must be smaller than chunk_size {}",
                self.chunking.overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(ChatdocError::Config("top_k must be greater than 0".to_string()));
        }
        Ok(())
    }
}
