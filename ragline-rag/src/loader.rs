use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use ragline_core::{Document, DocumentLoader, LoadError, Value};

/// Loads every regular file under one upload folder as UTF-8 text, in
/// file-name order. Attaches the metadata retrieval relies on: `source`,
/// `file_name` and `file_type`. Binary formats are rejected rather than
/// parsed; format-aware extraction belongs behind the loader seam.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectoryLoader;

impl DirectoryLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentLoader for DirectoryLoader {
    async fn load(&self, path: &Path) -> Result<Vec<Document>, LoadError> {
        let mut dir = tokio::fs::read_dir(path).await.map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut files = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })? {
            let file_type = entry.file_type().await.map_err(|source| LoadError::Io {
                path: entry.path().display().to_string(),
                source,
            })?;
            if file_type.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        let mut documents = Vec::with_capacity(files.len());
        for file in files {
            let bytes = tokio::fs::read(&file).await.map_err(|source| LoadError::Io {
                path: file.display().to_string(),
                source,
            })?;
            let content = String::from_utf8(bytes)
                .map_err(|_| LoadError::NotText(file.display().to_string()))?;

            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            let extension = file
                .extension()
                .map(|ext| ext.to_string_lossy().to_string())
                .unwrap_or_default();

            let mut metadata = HashMap::new();
            metadata.insert(
                "source".to_string(),
                Value::String(file.display().to_string()),
            );
            metadata.insert("file_name".to_string(), Value::String(file_name.clone()));
            metadata.insert("file_type".to_string(), Value::String(extension));

            documents.push(Document {
                id: file_name,
                content,
                metadata,
            });
        }

        Ok(documents)
    }
}
