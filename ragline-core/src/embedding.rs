use async_trait::async_trait;

use crate::EmbeddingError;

/// Maps text to a fixed-length vector. One configured provider produces
/// vectors of exactly one dimensionality.
#[async_trait]
pub trait Embedding: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    fn dimension(&self) -> usize;
}
