mod error;
mod hash;
mod ollama;

pub use error::EmbeddingProviderError;
pub use hash::HashEmbedder;
pub use ollama::OllamaEmbedding;
