use std::collections::HashMap;

use serde_json::Value;

use ragline_core::Node;

use crate::error::PineconeStoreError;

/// Flattens a node into the metadata payload persisted with its vector: the
/// node's own metadata plus the content under `text_key`.
pub fn node_to_metadata(node: &Node, text_key: &str) -> HashMap<String, Value> {
    let mut metadata = node.metadata.clone();
    metadata.insert(text_key.to_string(), Value::String(node.content.clone()));
    metadata
}

/// Rebuilds a node from a query match. The content must be present under
/// `text_key`; everything else is metadata.
pub fn match_to_node(
    id: &str,
    metadata: &Value,
    text_key: &str,
) -> Result<Node, PineconeStoreError> {
    let object = metadata.as_object().ok_or_else(|| {
        PineconeStoreError::Malformed("match metadata must be an object".to_string())
    })?;
    let text = object
        .get(text_key)
        .and_then(Value::as_str)
        .ok_or_else(|| PineconeStoreError::MissingTextKey {
            text_key: text_key.to_string(),
        })?
        .to_string();

    let mut out = HashMap::new();
    for (k, v) in object {
        if k != text_key {
            out.insert(k.clone(), v.clone());
        }
    }

    Ok(Node {
        id: id.to_string(),
        content: text,
        metadata: out,
        embedding: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_content_through_text_key() {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), json!("a.txt"));
        let node = Node::new("body text", metadata);

        let stored = node_to_metadata(&node, "text");
        let rebuilt = match_to_node(
            &node.id,
            &Value::Object(serde_json::Map::from_iter(stored)),
            "text",
        )
        .unwrap();

        assert_eq!(rebuilt.content, "body text");
        assert_eq!(rebuilt.metadata.get("source"), Some(&json!("a.txt")));
        assert!(!rebuilt.metadata.contains_key("text"));
    }

    #[test]
    fn missing_text_key_is_an_error() {
        let err = match_to_node("id", &json!({"source": "a.txt"}), "text").unwrap_err();
        assert!(matches!(err, PineconeStoreError::MissingTextKey { .. }));
    }
}
