use std::collections::HashMap;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ragline_core::{Collection, CollectionStore, Node, StoreError};
use ragline_pinecone::PineconeCollectionStore;

fn embedded_node(text: &str, embedding: Vec<f32>) -> Node {
    let mut node = Node::new(text, HashMap::new());
    node.embedding = Some(embedding);
    node
}

#[tokio::test]
async fn open_collection_recovers_dimension_from_index_stats() {
    let server = MockServer::start().await;

    // Control-plane description without a dimension.
    Mock::given(method("GET"))
        .and(path("/indexes/docs-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "docs-1",
            "host": "docs-1-abc123.svc.pinecone.io",
            "status": {"ready": true, "state": "Ready"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/describe_index_stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dimension": 3,
            "totalVectorCount": 42
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let store = PineconeCollectionStore::builder()
        .api_key("key")
        .control_url(server.uri())
        .data_url_override(server.uri())
        .build()
        .unwrap();

    let collection = store.open_collection("docs-1").await.unwrap();
    // The recovered dimension still guards writes.
    let err = collection
        .upsert(vec![embedded_node("short", vec![0.1, 0.2])])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::DimensionMismatch {
            expected: 3,
            got: 2
        }
    ));
}

#[tokio::test]
async fn stats_failure_is_not_fatal_to_open() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/indexes/docs-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "docs-1",
            "host": "docs-1-abc123.svc.pinecone.io",
            "status": {"ready": true, "state": "Ready"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/describe_index_stats"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let store = PineconeCollectionStore::builder()
        .api_key("key")
        .control_url(server.uri())
        .data_url_override(server.uri())
        .build()
        .unwrap();

    // Open succeeds; with no known dimension, validation is left to the
    // server side.
    let collection = store.open_collection("docs-1").await.unwrap();
    collection
        .upsert(vec![embedded_node("text", vec![0.1, 0.2])])
        .await
        .unwrap();
}
