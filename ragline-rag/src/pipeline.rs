use std::path::PathBuf;
use std::sync::Arc;

use ragline_core::{
    CollectionStore, DocumentLoader, Embedding, LoadError, Metric, RaglineError,
};

use crate::nodes::build_nodes;
use crate::{RagConfig, SentenceSplitter};

/// Outcome of one completed ingestion run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestReport {
    pub collection: String,
    pub documents: usize,
    pub nodes: usize,
    pub dimension: usize,
}

/// Orchestrates one collection run: load, chunk, build nodes, embed,
/// create-or-replace the collection, bulk upsert.
///
/// Any failure is terminal for the run and happens before the upsert, so a
/// failed run never leaves a partially embedded collection queryable; the
/// worst case is an absent collection, re-triggered by re-uploading.
pub struct IngestionPipeline {
    loader: Arc<dyn DocumentLoader>,
    embedder: Arc<dyn Embedding>,
    store: Arc<dyn CollectionStore>,
    splitter: SentenceSplitter,
    metric: Metric,
    uploads_root: PathBuf,
}

impl IngestionPipeline {
    pub fn new(
        config: &RagConfig,
        loader: Arc<dyn DocumentLoader>,
        embedder: Arc<dyn Embedding>,
        store: Arc<dyn CollectionStore>,
    ) -> Self {
        Self {
            loader,
            embedder,
            store,
            splitter: SentenceSplitter::new(config.chunk_size, config.chunk_overlap),
            metric: config.metric,
            uploads_root: config.uploads_root.clone(),
        }
    }

    pub async fn run(&self, folder_name: &str) -> Result<IngestReport, RaglineError> {
        let span = tracing::info_span!("ingest_run", collection = folder_name);
        let _guard = span.enter();

        let path = self.uploads_root.join(folder_name);
        let documents = self.loader.load(&path).await?;
        if documents.is_empty() {
            return Err(LoadError::EmptyBatch(path.display().to_string()).into());
        }
        tracing::info!(documents = documents.len(), "documents loaded");

        let mut nodes = build_nodes(&documents, &self.splitter)?;
        if nodes.is_empty() {
            return Err(LoadError::EmptyBatch(path.display().to_string()).into());
        }

        // Embed sequentially; the first failure aborts the run before any
        // store write, partial indexes being worse than none.
        for node in &mut nodes {
            let text = node.embedding_text();
            node.embedding = Some(self.embedder.embed(&text).await?);
        }

        let dimension = nodes[0]
            .embedding
            .as_ref()
            .map(Vec::len)
            .unwrap_or_default();
        for node in &nodes {
            let got = node.embedding.as_ref().map(Vec::len).unwrap_or_default();
            if got != dimension {
                return Err(RaglineError::Invariant(format!(
                    "embedding dimension drifted within one batch: {dimension} then {got}"
                )));
            }
        }

        let collection = self
            .store
            .ensure_collection(folder_name, dimension, self.metric)
            .await?;
        let node_count = nodes.len();
        collection.upsert(nodes).await?;

        tracing::info!(
            nodes = node_count,
            dimension,
            "ingestion run complete, vectors stored"
        );
        Ok(IngestReport {
            collection: folder_name.to_string(),
            documents: documents.len(),
            nodes: node_count,
            dimension,
        })
    }
}
