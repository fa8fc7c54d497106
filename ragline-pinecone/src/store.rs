use std::time::Duration;

use async_trait::async_trait;

use ragline_core::{Collection, CollectionStore, Metric, StoreError};

use crate::client::PineconeHttpClient;
use crate::collection::PineconeCollection;
use crate::config::PineconeStoreBuilder;
use crate::types::{
    CreateIndexRequest, IndexDescription, IndexSpec, IndexStatsResponse, ListIndexesResponse,
    ServerlessSpec,
};
use crate::PineconeStoreError;

/// Control-plane adapter owning the lifecycle of named Pinecone indexes.
/// Data-plane handles are bound to the per-index host the control plane
/// reports (or a fixed override for tests).
pub struct PineconeCollectionStore {
    control: PineconeHttpClient,
    data_url_override: Option<String>,
    text_key: String,
    max_batch_size: usize,
    cloud: String,
    region: String,
    ready_timeout: Duration,
    ready_poll_interval: Duration,
}

impl PineconeCollectionStore {
    pub fn builder() -> PineconeStoreBuilder {
        PineconeStoreBuilder::new()
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        control: PineconeHttpClient,
        data_url_override: Option<String>,
        text_key: String,
        max_batch_size: usize,
        cloud: String,
        region: String,
        ready_timeout: Duration,
        ready_poll_interval: Duration,
    ) -> Self {
        Self {
            control,
            data_url_override,
            text_key,
            max_batch_size,
            cloud,
            region,
            ready_timeout,
            ready_poll_interval,
        }
    }

    pub fn text_key(&self) -> &str {
        &self.text_key
    }

    async fn describe(&self, name: &str) -> Result<Option<IndexDescription>, PineconeStoreError> {
        match self
            .control
            .get_typed::<IndexDescription>(&format!("/indexes/{name}"))
            .await
        {
            Ok(description) => Ok(Some(description)),
            Err(err) if err.status() == Some(404) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Blocks until the index reports ready. Newly created serverless
    /// indexes come up asynchronously and reject writes until then.
    async fn wait_ready(&self, name: &str) -> Result<IndexDescription, PineconeStoreError> {
        let deadline = tokio::time::Instant::now() + self.ready_timeout;
        loop {
            if let Some(description) = self.describe(name).await? {
                let ready = description.status.as_ref().map_or(true, |s| s.ready);
                if ready {
                    return Ok(description);
                }
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(PineconeStoreError::NotReady(name.to_string()));
            }
            tokio::time::sleep(self.ready_poll_interval).await;
        }
    }

    fn data_client(
        &self,
        description: &IndexDescription,
    ) -> Result<PineconeHttpClient, PineconeStoreError> {
        let base_url = match &self.data_url_override {
            Some(url) => url.clone(),
            None => {
                let host = description.host.as_deref().ok_or_else(|| {
                    PineconeStoreError::Malformed(format!(
                        "index {} description missing host",
                        description.name
                    ))
                })?;
                format!("https://{host}")
            }
        };
        self.control.with_base_url(base_url)
    }

    fn open_handle(
        &self,
        description: &IndexDescription,
    ) -> Result<Box<dyn Collection>, PineconeStoreError> {
        let client = self.data_client(description)?;
        Ok(Box::new(PineconeCollection::new(
            client,
            description.name.clone(),
            description.dimension,
            self.text_key.clone(),
            self.max_batch_size,
        )))
    }

    /// Recovers the dimension from the data plane when the control-plane
    /// description omits it. Warn-only: without a dimension the handle just
    /// skips client-side dimension validation.
    async fn resolve_dimension(&self, description: &mut IndexDescription) {
        if description.dimension.is_some() {
            return;
        }
        let client = match self.data_client(description) {
            Ok(client) => client,
            Err(err) => {
                tracing::warn!(index = %description.name, error = %err, "no data-plane client for index stats");
                return;
            }
        };
        let stats = client
            .post_typed::<serde_json::Value, IndexStatsResponse>(
                "/describe_index_stats",
                &serde_json::Value::Object(serde_json::Map::new()),
            )
            .await;
        match stats {
            Ok(stats) => match stats.dimension {
                Some(dimension) => description.dimension = Some(dimension),
                None => {
                    tracing::warn!(index = %description.name, "index stats response missing 'dimension'");
                }
            },
            Err(err) => {
                tracing::warn!(index = %description.name, error = %err, "failed to read index stats");
            }
        }
    }
}

#[async_trait]
impl CollectionStore for PineconeCollectionStore {
    /// Replace, never merge: an existing index with this name is deleted
    /// before the new one is created.
    async fn ensure_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: Metric,
    ) -> Result<Box<dyn Collection>, StoreError> {
        let span = tracing::info_span!("pinecone_ensure_collection", index = name, dimension, ?metric);
        let _guard = span.enter();

        if self.describe(name).await.map_err(StoreError::from)?.is_some() {
            tracing::info!(index = name, "removing previous index before recreate");
            self.control
                .delete(&format!("/indexes/{name}"))
                .await
                .map_err(StoreError::from)?;
        }

        let request = CreateIndexRequest {
            name: name.to_string(),
            dimension,
            metric,
            spec: IndexSpec {
                serverless: ServerlessSpec {
                    cloud: self.cloud.clone(),
                    region: self.region.clone(),
                },
            },
        };
        let _: IndexDescription = self
            .control
            .post_typed("/indexes", &request)
            .await
            .map_err(StoreError::from)?;

        let description = self.wait_ready(name).await.map_err(StoreError::from)?;
        tracing::info!(index = name, "index created");
        self.open_handle(&description).map_err(StoreError::from)
    }

    async fn open_collection(&self, name: &str) -> Result<Box<dyn Collection>, StoreError> {
        match self.describe(name).await.map_err(StoreError::from)? {
            Some(mut description) => {
                self.resolve_dimension(&mut description).await;
                self.open_handle(&description).map_err(StoreError::from)
            }
            None => Err(StoreError::NotFound(name.to_string())),
        }
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let response: ListIndexesResponse = self
            .control
            .get_typed("/indexes")
            .await
            .map_err(StoreError::from)?;
        Ok(response.indexes.into_iter().map(|idx| idx.name).collect())
    }

    async fn delete_collection(&self, name: &str) -> Result<(), StoreError> {
        if self.describe(name).await.map_err(StoreError::from)?.is_none() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        self.control
            .delete(&format!("/indexes/{name}"))
            .await
            .map_err(StoreError::from)
    }
}
