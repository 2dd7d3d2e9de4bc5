//! API layer for chatdoc-rs
//!
//! This module provides the two orchestrators: running chat history and
//! single-shot document question answering.

pub mod chat;
pub mod openai;
pub mod qa;

// Re-export main API types
pub use chat::{ChatModel, submit};
pub use openai::OpenAIChat;
pub use qa::{answer, build_stuff_prompt, generate_response, retrieve};
