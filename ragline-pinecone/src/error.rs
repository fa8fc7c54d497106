use thiserror::Error;

use ragline_core::StoreError;

#[derive(Debug, Error)]
pub enum PineconeStoreError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("pinecone api error {status}: {message} (index={index:?}, batch_size={batch_size:?})")]
    Api {
        status: u16,
        message: String,
        index: Option<String>,
        batch_size: Option<usize>,
    },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("node reconstruction failed: missing or non-string text key '{text_key}'")]
    MissingTextKey { text_key: String },
    #[error("node {id} has no embedding")]
    MissingEmbedding { id: String },
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("index {0} did not become ready in time")]
    NotReady(String),
}

impl PineconeStoreError {
    pub fn status(&self) -> Option<u16> {
        match self {
            PineconeStoreError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<PineconeStoreError> for StoreError {
    fn from(value: PineconeStoreError) -> Self {
        match value {
            PineconeStoreError::DimensionMismatch { expected, got } => {
                StoreError::DimensionMismatch { expected, got }
            }
            PineconeStoreError::Config(message) => StoreError::Config(message),
            other => StoreError::Internal(Box::new(other)),
        }
    }
}
