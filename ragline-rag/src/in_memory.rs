use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ragline_core::{Collection, CollectionStore, Metric, Node, ScoredNode, StoreError};

#[derive(Default)]
struct StoreInner {
    collections: HashMap<String, CollectionData>,
}

struct CollectionData {
    dimension: usize,
    metric: Metric,
    nodes: Vec<Node>,
}

/// Process-local collection store. Backs tests and offline runs with the
/// same lifecycle semantics as the Pinecone adapter: `ensure_collection`
/// replaces, dimension is bound at creation and enforced on every write.
#[derive(Clone, Default)]
pub struct InMemoryCollectionStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node count of a collection, for assertions in tests.
    pub async fn collection_len(&self, name: &str) -> Option<usize> {
        let inner = self.inner.read().await;
        inner.collections.get(name).map(|data| data.nodes.len())
    }
}

#[async_trait]
impl CollectionStore for InMemoryCollectionStore {
    async fn ensure_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: Metric,
    ) -> Result<Box<dyn Collection>, StoreError> {
        let mut inner = self.inner.write().await;
        // Replace, never merge.
        inner.collections.insert(
            name.to_string(),
            CollectionData {
                dimension,
                metric,
                nodes: Vec::new(),
            },
        );
        Ok(Box::new(InMemoryCollection {
            inner: self.inner.clone(),
            name: name.to_string(),
        }))
    }

    async fn open_collection(&self, name: &str) -> Result<Box<dyn Collection>, StoreError> {
        let inner = self.inner.read().await;
        if !inner.collections.contains_key(name) {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(Box::new(InMemoryCollection {
            inner: self.inner.clone(),
            name: name.to_string(),
        }))
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().await;
        let mut names: Vec<String> = inner.collections.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn delete_collection(&self, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.collections.remove(name).is_none() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(())
    }
}

struct InMemoryCollection {
    inner: Arc<RwLock<StoreInner>>,
    name: String,
}

#[async_trait]
impl Collection for InMemoryCollection {
    async fn upsert(&self, nodes: Vec<Node>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let data = inner
            .collections
            .get_mut(&self.name)
            .ok_or_else(|| StoreError::NotFound(self.name.clone()))?;

        // Validate the whole batch before touching the collection so a
        // failed upsert leaves it unchanged.
        for node in &nodes {
            if node.id.trim().is_empty() {
                return Err(StoreError::InvalidId(node.id.clone()));
            }
            let embedding = node.embedding.as_ref().ok_or_else(|| {
                StoreError::Internal(Box::new(std::io::Error::other(format!(
                    "node {} has no embedding",
                    node.id
                ))))
            })?;
            if embedding.len() != data.dimension {
                return Err(StoreError::DimensionMismatch {
                    expected: data.dimension,
                    got: embedding.len(),
                });
            }
        }

        for node in nodes {
            if let Some(existing) = data.nodes.iter_mut().find(|n| n.id == node.id) {
                *existing = node;
            } else {
                data.nodes.push(node);
            }
        }
        Ok(())
    }

    async fn query(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredNode>, StoreError> {
        let inner = self.inner.read().await;
        let data = inner
            .collections
            .get(&self.name)
            .ok_or_else(|| StoreError::NotFound(self.name.clone()))?;

        if query_embedding.len() != data.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: data.dimension,
                got: query_embedding.len(),
            });
        }

        let mut scored: Vec<ScoredNode> = data
            .nodes
            .iter()
            .map(|node| {
                let embedding = node.embedding.as_deref().unwrap_or(&[]);
                let mut score = similarity(data.metric, query_embedding, embedding);
                if score.is_nan() {
                    score = f32::NEG_INFINITY;
                }
                let mut result = node.clone();
                result.embedding = None;
                ScoredNode {
                    node: result,
                    score,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        Ok(scored)
    }
}

fn similarity(metric: Metric, a: &[f32], b: &[f32]) -> f32 {
    match metric {
        Metric::DotProduct => dot(a, b),
        Metric::Cosine => {
            let norm_a = dot(a, a).sqrt();
            let norm_b = dot(b, b).sqrt();
            if norm_a == 0.0 || norm_b == 0.0 {
                0.0
            } else {
                dot(a, b) / (norm_a * norm_b)
            }
        }
        // Negated distance so larger is still better.
        Metric::Euclidean => {
            -a.iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f32>()
                .sqrt()
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
