//! Umbrella crate for Ragline: document-set ingestion and
//! retrieval-augmented chat over per-collection vector indexes.
//!
//! Pulls the workspace crates together behind feature flags. A typical
//! deployment wires [`rag::RagService`] from an Ollama embedder and chat
//! client plus the Pinecone collection store; tests and offline runs swap in
//! [`rag::InMemoryCollectionStore`] and the hash embedder without touching
//! the service code.

pub use ragline_core as core;
pub use ragline_memory as memory;
pub use ragline_rag as rag;

#[cfg(feature = "ollama")]
pub use ragline_embeddings as embeddings;
#[cfg(feature = "ollama")]
pub use ragline_llm as llm;
#[cfg(feature = "pinecone")]
pub use ragline_pinecone as pinecone;

pub use ragline_core::{
    ChatLlm, Collection, CollectionStore, Document, DocumentLoader, Embedding, Message, Metric,
    Node, RaglineError, Role, ScoredNode,
};
pub use ragline_rag::{RagConfig, RagService};

/// Builds the Ollama embedding provider from the shared configuration,
/// using its `embedding_model`. The dimension is whatever the chosen model
/// emits; responses of any other dimension are rejected by the provider.
#[cfg(feature = "ollama")]
pub fn ollama_embedding(
    config: &RagConfig,
    base_url: impl Into<String>,
    dimension: usize,
) -> embeddings::OllamaEmbedding {
    embeddings::OllamaEmbedding::new(base_url.into(), config.embedding_model.clone(), dimension)
}

/// Builds the Ollama chat backend from the shared configuration, using its
/// `chat_model` and `llm_request_timeout`.
#[cfg(feature = "ollama")]
pub fn ollama_chat(
    config: &RagConfig,
    base_url: impl Into<String>,
) -> Result<llm::OllamaClient, RaglineError> {
    let client = llm::OllamaClient::with_timeout(
        base_url.into(),
        config.chat_model.clone(),
        config.llm_request_timeout,
    )?;
    Ok(client)
}
