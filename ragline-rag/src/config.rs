use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use ragline_core::Metric;

/// Recognized configuration surface for the ingestion pipeline and chat
/// sessions. Provider credentials and endpoints stay on the provider
/// builders.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Target chunk length, in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks, in characters.
    pub chunk_overlap: usize,
    /// Embedding model identifier, forwarded to the embedding provider.
    pub embedding_model: String,
    /// Chat model identifier, forwarded to the language-model backend.
    pub chat_model: String,
    /// Similarity metric new collections are created with.
    pub metric: Metric,
    /// Nodes retrieved per chat turn.
    pub top_k: usize,
    /// Conversational memory budget, in approximate tokens.
    pub memory_token_budget: usize,
    /// Language-model request timeout.
    #[serde(with = "seconds")]
    pub llm_request_timeout: Duration,
    /// Root directory upload folders live under.
    pub uploads_root: PathBuf,
    /// Capacity of the background ingest queue.
    pub queue_capacity: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1024,
            chunk_overlap: 512,
            embedding_model: "bge-small-en-v1.5".to_string(),
            chat_model: "llama3.2".to_string(),
            metric: Metric::DotProduct,
            top_k: 5,
            memory_token_budget: 3900,
            llm_request_timeout: Duration::from_secs(600),
            uploads_root: PathBuf::from("uploads"),
            queue_capacity: 32,
        }
    }
}

mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
