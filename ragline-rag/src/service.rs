use std::sync::Arc;

use ragline_core::{ChatLlm, CollectionStore, DocumentLoader, Embedding, RaglineError, StoreError};

use crate::{IngestQueue, IngestionPipeline, RagConfig, SessionManager};

/// The contract this crate exposes to the transport layer above it: accept
/// an upload batch for background ingestion, list and delete collections,
/// and answer chat turns against one collection at a time.
pub struct RagService {
    queue: IngestQueue,
    manager: SessionManager,
    store: Arc<dyn CollectionStore>,
}

impl RagService {
    pub fn new(
        config: RagConfig,
        store: Arc<dyn CollectionStore>,
        loader: Arc<dyn DocumentLoader>,
        embedder: Arc<dyn Embedding>,
        llm: Arc<dyn ChatLlm>,
    ) -> Self {
        let pipeline = Arc::new(IngestionPipeline::new(
            &config,
            loader,
            embedder.clone(),
            store.clone(),
        ));
        let queue = IngestQueue::spawn(pipeline, config.queue_capacity);
        let manager = SessionManager::new(&config, store.clone(), embedder, llm);
        Self {
            queue,
            manager,
            store,
        }
    }

    /// Accepts an ingestion run for the named upload folder. Returning `Ok`
    /// means the job was queued, not that it completed; completion is
    /// observable through [`RagService::list_collections`].
    pub fn ingest(&self, folder_name: &str) -> Result<(), RaglineError> {
        self.queue.enqueue(folder_name)?;
        Ok(())
    }

    pub async fn list_collections(&self) -> Result<Vec<String>, RaglineError> {
        Ok(self.store.list_collections().await?)
    }

    pub async fn delete_collection(&self, name: &str) -> Result<(), RaglineError> {
        self.store
            .delete_collection(name)
            .await
            .map_err(|err| match err {
                StoreError::NotFound(name) => RaglineError::NotFound(name),
                other => RaglineError::from(other),
            })
    }

    pub async fn chat(&self, collection_id: &str, query: &str) -> Result<String, RaglineError> {
        self.manager.chat(collection_id, query).await
    }
}
