//! # chatdoc-rs
//!
//! Two small terminal front ends for OpenAI-compatible language models: a chat
//! that keeps its running history, and single-shot question answering over an
//! uploaded document.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatdoc::{ChatSession, Config, Credential, OpenAIChat, submit};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let credential = Credential::from_env()?;
//!     let model = OpenAIChat::new(&credential, &config.api, &config.chat);
//!
//!     let session = ChatSession::new(config.chat.system_prompt.as_str());
//!     let session = submit(session, "What is a qubit?", &model).await?;
//!
//!     for message in session.transcript() {
//!         println!("{}: {}", message.role, message.content);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod config;
pub mod credential;
pub mod error;
pub mod ml;
pub mod session;
pub mod text;
pub mod ui;

// Re-export main API types
pub use api::{ChatModel, OpenAIChat, answer, generate_response, submit};
pub use config::Config;
pub use credential::Credential;
pub use error::{ChatdocError, Result};
pub use session::{ChatSession, Message, Role};

// Re-export commonly used types
pub use text::{Chunk, UploadedFile};
pub use ui::QaForm;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_imports() {
        // Ensure all major types can be imported
        let _config = Config::default();
        let _session = ChatSession::new(config::DEFAULT_SYSTEM_PROMPT);
        let _form = QaForm::new();
    }
}
