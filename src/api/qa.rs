//! Single-shot document question answering
//!
//! The pipeline decodes an uploaded file, chunks it, embeds the chunks, indexes
//! them in memory, retrieves the chunks closest to the query and stuffs them
//! verbatim into one prompt. Every step runs to completion before the next one
//! starts, and any failure aborts the whole request.

use crate::api::chat::ChatModel;
use crate::api::openai::OpenAIChat;
use crate::config::Config;
use crate::credential::Credential;
use crate::error::{ChatdocError, Result};
use crate::ml::{Embedder, OpenAIEmbedder, SearchConfig, VectorSearchIndex};
use crate::session::Message;
use crate::text::{Chunk, TextChunker, UploadedFile, decode};

/// Retrieve the chunks most relevant to `query`, closest first
pub async fn retrieve<E: Embedder>(
    chunks: &[Chunk],
    query: &str,
    top_k: usize,
    embedder: &E,
) -> Result<Vec<Chunk>> {
    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let embeddings = embedder.embed_batch(&texts).await?;
    if embeddings.len() != chunks.len() {
        return Err(ChatdocError::Embedding(format!(
            "expected {} embeddings, got {}",
            chunks.len(),
            embeddings.len()
        )));
    }

    let index = VectorSearchIndex::from_embeddings(embeddings, SearchConfig::default())?;
    let query_embedding = embedder.embed(query).await?;
    let hits = index.search(&query_embedding, top_k)?;

    log::info!("Retrieved {} of {} chunks", hits.len(), chunks.len());
    for hit in &hits {
        log::debug!("Chunk {} at distance {:.4}", hit.id, hit.distance);
    }

    hits.into_iter()
        .map(|hit| {
            chunks.get(hit.id).cloned().ok_or_else(|| {
                ChatdocError::Search(format!("index returned unknown chunk {}", hit.id))
            })
        })
        .collect()
}

/// Combine retrieved chunks and the question into one prompt
pub fn build_stuff_prompt(chunks: &[Chunk], query: &str) -> String {
    let context = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Use the following pieces of context to answer the question at the end. \
         If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\n\
         {context}\n\n\
         Question: {query}\n\
         Helpful Answer:"
    )
}

/// Run the whole pipeline with caller-supplied services
pub async fn answer<E: Embedder, M: ChatModel>(
    document: &UploadedFile,
    query: &str,
    config: &Config,
    embedder: &E,
    llm: &M,
) -> Result<String> {
    let text = decode(document)?;

    let chunker = TextChunker::new(config.chunking.clone())?;
    let chunks = chunker.chunk_text(&text)?;
    log::info!("Split {} into {} chunks", document.name, chunks.len());

    let relevant = retrieve(&chunks, query, config.retrieval.top_k, embedder).await?;
    let prompt = build_stuff_prompt(&relevant, query);

    let reply = llm.complete(&[Message::user(prompt)]).await?;
    Ok(reply.content)
}

/// Answer `query` about `document` using the OpenAI services
///
/// The credential is consumed and scrubbed once the answer comes back.
pub async fn generate_response(
    document: &UploadedFile,
    credential: Credential,
    query: &str,
    config: &Config,
) -> Result<String> {
    let embedder = OpenAIEmbedder::new(
        &credential,
        &config.api,
        config.retrieval.embedding_model.as_str(),
    );
    let llm = OpenAIChat::new(&credential, &config.api, &config.chat)
        .with_model(config.retrieval.completion_model.as_str());
    drop(credential);

    answer(document, query, config, &embedder, &llm).await
}
