use serde::{Deserialize, Serialize};
use serde_json::Value;

use ragline_core::Metric;

// Control plane --------------------------------------------------------------

#[derive(Clone, Debug, Serialize)]
pub struct CreateIndexRequest {
    pub name: String,
    pub dimension: usize,
    pub metric: Metric,
    pub spec: IndexSpec,
}

#[derive(Clone, Debug, Serialize)]
pub struct IndexSpec {
    pub serverless: ServerlessSpec,
}

#[derive(Clone, Debug, Serialize)]
pub struct ServerlessSpec {
    pub cloud: String,
    pub region: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct IndexDescription {
    pub name: String,
    #[serde(default)]
    pub dimension: Option<usize>,
    #[serde(default)]
    pub metric: Option<Metric>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub status: Option<IndexStatus>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct IndexStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ListIndexesResponse {
    #[serde(default)]
    pub indexes: Vec<IndexDescription>,
}

// Data plane -----------------------------------------------------------------

#[derive(Clone, Debug, Serialize)]
pub struct PineconeVector {
    pub id: String,
    pub values: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Clone, Debug, Serialize)]
pub struct UpsertRequest {
    pub vectors: Vec<PineconeVector>,
}

#[derive(Clone, Debug, Serialize)]
pub struct QueryRequest {
    pub vector: Vec<f32>,
    pub top_k: usize,
    pub include_metadata: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct QueryMatch {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub matches: Vec<QueryMatch>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct IndexStatsResponse {
    #[serde(default)]
    pub dimension: Option<usize>,
}
