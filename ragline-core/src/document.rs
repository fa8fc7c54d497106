use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Value;

/// Raw text plus loader-attached metadata, as produced by a
/// [`DocumentLoader`](crate::DocumentLoader). Immutable once loaded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub metadata: HashMap<String, Value>,
}

/// The unit persisted into and retrieved from a collection: one chunk of a
/// document's text, the source document's metadata copied verbatim, and the
/// embedding written once by the embed stage.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: String,
    pub content: String,
    pub metadata: HashMap<String, Value>,
    pub embedding: Option<Vec<f32>>,
}

impl Node {
    pub fn new(content: impl Into<String>, metadata: HashMap<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            metadata,
            embedding: None,
        }
    }

    /// The text handed to the embedder: metadata rendered as `key: value`
    /// lines above the chunk content, so metadata terms (file names etc.)
    /// land in the vector space alongside the content.
    pub fn embedding_text(&self) -> String {
        let mut keys: Vec<&String> = self.metadata.keys().collect();
        keys.sort();

        let mut out = String::new();
        for key in keys {
            let value = &self.metadata[key];
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&rendered);
            out.push('\n');
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.content);
        out
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoredNode {
    pub node: Node,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_text_renders_metadata_before_content() {
        let mut metadata = HashMap::new();
        metadata.insert(
            "file_name".to_string(),
            Value::String("report.txt".to_string()),
        );
        metadata.insert("page".to_string(), Value::from(3));

        let node = Node::new("chunk body", metadata);
        let text = node.embedding_text();

        assert!(text.starts_with("file_name: report.txt\npage: 3\n\n"));
        assert!(text.ends_with("chunk body"));
    }

    #[test]
    fn embedding_text_without_metadata_is_just_content() {
        let node = Node::new("plain", HashMap::new());
        assert_eq!(node.embedding_text(), "plain");
    }
}
