use std::{error::Error as StdError, time::Duration};

use thiserror::Error;

/// Top-level error for the ingestion pipeline and chat surface. Each variant
/// maps to one kind in the error taxonomy so the transport layer above can
/// translate kind + message into status codes.
#[derive(Debug, Error)]
pub enum RaglineError {
    #[error("load failed: {0}")]
    Load(#[from] LoadError),
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("invariant violated: {0}")]
    Invariant(String),
    #[error("collection not found: {0}")]
    NotFound(String),
    #[error("serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Custom(String),
}

impl RaglineError {
    /// Collapses the store-level not-found into the top-level one so callers
    /// match a single variant regardless of which layer reported it.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RaglineError::NotFound(_))
            || matches!(self, RaglineError::Store(StoreError::NotFound(_)))
    }
}

/// Document loader failure. Fatal to an ingestion run, nothing is upserted.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("file {0} is not valid UTF-8 text")]
    NotText(String),
    #[error("no documents found under {0}")]
    EmptyBatch(String),
}

/// Embedding provider failure. Fatal to an ingestion run before any upsert;
/// partial indexes are worse than none.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding invalid response: {0}")]
    InvalidResponse(String),
    #[error("embedding timeout after {0:?}")]
    Timeout(Duration),
    #[error("embedding provider error: {0}")]
    Provider(String),
    #[error("embedding error: {0}")]
    Other(#[source] Box<dyn StdError + Send + Sync>),
}

/// Vector collection service failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("collection not found: {0}")]
    NotFound(String),
    #[error("invalid node id: {0}")]
    InvalidId(String),
    #[error("store error: {0}")]
    Internal(#[source] Box<dyn StdError + Send + Sync>),
}

/// Language-model backend failure on one chat turn. The session's memory is
/// left untouched so a retry is idempotent with respect to history.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    #[error("llm provider error: {0}")]
    Provider(String),
    #[error("malformed llm response: {0}")]
    Malformed(String),
}
