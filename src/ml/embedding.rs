//! Remote embedding generation
//!
//! Chunks and queries are embedded by an OpenAI-compatible embeddings endpoint.
//! The [`Embedder`] trait is the seam the QA pipeline depends on, so tests can
//! swap the remote service for a local fake.

use crate::api::openai::build_client;
use crate::config::ApiConfig;
use crate::credential::Credential;
use crate::error::{ChatdocError, Result};
use async_openai::{Client, config::OpenAIConfig, types::CreateEmbeddingRequestArgs};

/// Embedding vector type
pub type Embedding = Vec<f32>;

/// Most inputs the OpenAI embeddings endpoint is sent in one request
pub const MAX_EMBEDDING_BATCH: usize = 1000;

/// Anything that can turn texts into vectors
///
/// Implementors provide a single remote request; `embed_batch` splits large
/// inputs into requests of at most `max_batch_size` texts and sends them one
/// after another.
// Futures are awaited on the caller's task, so no `Send` bound is promised.
#[allow(async_fn_in_trait)]
pub trait Embedder {
    /// Embed one request's worth of texts, one vector per input in order
    async fn embed_request(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Largest number of texts sent in one request
    fn max_batch_size(&self) -> usize {
        MAX_EMBEDDING_BATCH
    }

    /// Embed every text, returning one vector per input in the same order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let batch_size = self.max_batch_size().max(1);
        let mut embeddings = Vec::with_capacity(texts.len());

        for (n, group) in texts.chunks(batch_size).enumerate() {
            log::debug!("Embedding request {} with {} texts", n + 1, group.len());
            let vectors = self.embed_request(group).await?;
            if vectors.len() != group.len() {
                return Err(ChatdocError::Embedding(format!(
                    "expected {} embeddings, got {}",
                    group.len(),
                    vectors.len()
                )));
            }
            embeddings.extend(vectors);
        }

        Ok(embeddings)
    }

    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| ChatdocError::Embedding("empty embedding response".to_string()))
    }
}

/// Embedder backed by the OpenAI embeddings API
pub struct OpenAIEmbedder {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIEmbedder {
    pub fn new(credential: &Credential, api: &ApiConfig, model: impl Into<String>) -> Self {
        Self {
            client: build_client(credential, api),
            model: model.into(),
        }
    }
}

impl Embedder for OpenAIEmbedder {
    async fn embed_request(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        log::info!("Requesting {} embeddings from {}", texts.len(), self.model);

        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.as_str())
            .input(texts.to_vec())
            .build()?;

        let response = self.client.embeddings().create(request).await?;

        let mut data = response.data;
        if data.len() != texts.len() {
            return Err(ChatdocError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                data.len()
            )));
        }

        // The API tags every vector with its input position.
        data.sort_by_key(|item| item.index);
        Ok(data.into_iter().map(|item| item.embedding).collect())
    }
}
