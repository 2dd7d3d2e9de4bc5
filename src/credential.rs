//! API key handling
//!
//! The chat front end reads its key from the environment once at startup. The
//! document QA front end takes a key per request and drops it right after the
//! pipeline finishes.

use crate::error::{ChatdocError, Result};
use std::fmt;

/// Environment variable holding the OpenAI key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Literal prefix every OpenAI secret key carries
pub const API_KEY_PREFIX: &str = "sk-";

/// An API key
///
/// `Debug` never prints the value. On drop the buffer is overwritten with
/// zeros. This is best effort only: copies made by the HTTP client or the
/// terminal are out of reach.
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the key from [`API_KEY_VAR`], rejecting a missing or empty value
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Credential::from_env`] with an injectable variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match lookup(API_KEY_VAR) {
            Some(key) if !key.is_empty() => Ok(Self(key)),
            _ => Err(ChatdocError::Credential(format!("{} is not set", API_KEY_VAR))),
        }
    }

    /// Whether the key looks like an OpenAI secret key
    pub fn has_valid_prefix(&self) -> bool {
        self.0.starts_with(API_KEY_PREFIX)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        let mut bytes = std::mem::take(&mut self.0).into_bytes();
        bytes.fill(0);
        std::hint::black_box(&bytes);
    }
}
