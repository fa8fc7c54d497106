use async_trait::async_trait;
use serde_json::Value;

use ragline_core::{Collection, Node, ScoredNode, StoreError};

use crate::client::PineconeHttpClient;
use crate::mapper::{match_to_node, node_to_metadata};
use crate::types::{PineconeVector, QueryRequest, QueryResponse, UpsertRequest};
use crate::PineconeStoreError;

/// Data-plane handle for one bound index.
pub struct PineconeCollection {
    client: PineconeHttpClient,
    name: String,
    dimension: Option<usize>,
    text_key: String,
    max_batch_size: usize,
}

impl PineconeCollection {
    pub(crate) fn new(
        client: PineconeHttpClient,
        name: String,
        dimension: Option<usize>,
        text_key: String,
        max_batch_size: usize,
    ) -> Self {
        Self {
            client,
            name,
            dimension,
            text_key,
            max_batch_size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl Collection for PineconeCollection {
    async fn upsert(&self, nodes: Vec<Node>) -> Result<(), StoreError> {
        let span = tracing::info_span!(
            "pinecone_upsert",
            index = %self.name,
            batch_size = nodes.len(),
            text_key = %self.text_key,
        );
        let _guard = span.enter();

        let mut vectors = Vec::with_capacity(nodes.len());
        for node in &nodes {
            let embedding = node.embedding.as_ref().ok_or_else(|| {
                StoreError::from(PineconeStoreError::MissingEmbedding {
                    id: node.id.clone(),
                })
            })?;
            if let Some(expected) = self.dimension {
                if embedding.len() != expected {
                    return Err(PineconeStoreError::DimensionMismatch {
                        expected,
                        got: embedding.len(),
                    }
                    .into());
                }
            }
            if node.id.trim().is_empty() {
                return Err(StoreError::InvalidId(node.id.clone()));
            }

            let metadata_map = node_to_metadata(node, &self.text_key);
            let metadata = Value::Object(serde_json::Map::from_iter(metadata_map));

            vectors.push(PineconeVector {
                id: node.id.clone(),
                values: embedding.clone(),
                metadata: Some(metadata),
            });
        }

        let total_chunks = vectors.len().div_ceil(self.max_batch_size);
        for (chunk_index, chunk) in vectors.chunks(self.max_batch_size).enumerate() {
            let chunk_span = tracing::info_span!(
                "pinecone_upsert_chunk",
                index = %self.name,
                chunk_index = chunk_index + 1,
                total_chunks = total_chunks,
                batch_size = chunk.len(),
            );
            let _chunk_guard = chunk_span.enter();

            let request = UpsertRequest {
                vectors: chunk.to_vec(),
            };

            let _: Value = self
                .client
                .post_typed_with_context(
                    "/vectors/upsert",
                    &request,
                    Some(&self.name),
                    Some(request.vectors.len()),
                )
                .await
                .map_err(StoreError::from)?;
        }

        Ok(())
    }

    async fn query(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredNode>, StoreError> {
        let span = tracing::info_span!(
            "pinecone_query",
            index = %self.name,
            top_k = top_k,
            text_key = %self.text_key,
        );
        let _guard = span.enter();

        if let Some(expected) = self.dimension {
            if query_embedding.len() != expected {
                return Err(StoreError::DimensionMismatch {
                    expected,
                    got: query_embedding.len(),
                });
            }
        }

        let request = QueryRequest {
            vector: query_embedding.to_vec(),
            top_k,
            include_metadata: true,
        };

        let response: QueryResponse = self
            .client
            .post_typed_with_context("/query", &request, Some(&self.name), None)
            .await
            .map_err(StoreError::from)?;

        let mut output = Vec::with_capacity(response.matches.len());
        for m in response.matches {
            let metadata = m
                .metadata
                .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
            let node = match_to_node(&m.id, &metadata, &self.text_key).map_err(StoreError::from)?;
            output.push(ScoredNode {
                node,
                score: m.score,
            });
        }

        Ok(output)
    }
}
