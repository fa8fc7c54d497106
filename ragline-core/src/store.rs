use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Node, ScoredNode, StoreError};

/// Similarity metric a collection is created with. Wire names follow the
/// Pinecone API.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    #[serde(rename = "dotproduct")]
    DotProduct,
    Cosine,
    Euclidean,
}

/// Owns the lifecycle of named vector collections.
///
/// `ensure_collection` is replace-never-merge: an existing collection with
/// the same name is deleted first, then recreated with the given dimension
/// and metric. Re-uploading to a name fully supersedes prior content.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn ensure_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: Metric,
    ) -> Result<Box<dyn Collection>, StoreError>;

    /// Opens an existing collection for querying. `StoreError::NotFound`
    /// when no collection has this name.
    async fn open_collection(&self, name: &str) -> Result<Box<dyn Collection>, StoreError>;

    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    /// `StoreError::NotFound` when no collection has this name.
    async fn delete_collection(&self, name: &str) -> Result<(), StoreError>;
}

/// One bound, named collection: bulk upsert and top-k query.
#[async_trait]
pub trait Collection: Send + Sync {
    /// Bulk-writes the nodes' (content, metadata, embedding). All-or-nothing
    /// from the caller's perspective: an error means the batch must be
    /// treated as failed.
    async fn upsert(&self, nodes: Vec<Node>) -> Result<(), StoreError>;

    async fn query(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredNode>, StoreError>;
}

impl std::fmt::Debug for dyn Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Collection")
    }
}
