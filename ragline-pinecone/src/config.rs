use std::time::Duration;

use crate::client::PineconeHttpClient;
use crate::store::PineconeCollectionStore;
use crate::PineconeStoreError;

const DEFAULT_CONTROL_URL: &str = "https://api.pinecone.io";

pub struct PineconeStoreBuilder {
    api_key: Option<String>,
    control_url: String,
    data_url_override: Option<String>,
    text_key: String,
    max_batch_size: usize,
    cloud: String,
    region: String,
    ready_timeout: Duration,
    ready_poll_interval: Duration,
}

impl Default for PineconeStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PineconeStoreBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            control_url: DEFAULT_CONTROL_URL.to_string(),
            data_url_override: None,
            text_key: "text".to_string(),
            max_batch_size: 100,
            cloud: "aws".to_string(),
            region: "us-east-1".to_string(),
            ready_timeout: Duration::from_secs(60),
            ready_poll_interval: Duration::from_millis(250),
        }
    }

    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        self.api_key = Some(value.into());
        self
    }

    pub fn api_key_from_env(mut self, var_name: &str) -> Self {
        if let Ok(value) = std::env::var(var_name) {
            self.api_key = Some(value);
        }
        self
    }

    pub fn control_url(mut self, value: impl Into<String>) -> Self {
        self.control_url = value.into();
        self
    }

    pub fn control_url_from_env(mut self, var_name: &str) -> Self {
        if let Ok(value) = std::env::var(var_name) {
            self.control_url = value;
        }
        self
    }

    /// Routes all data-plane calls to one fixed URL instead of the per-index
    /// host reported by the control plane. Meant for tests and gateways.
    pub fn data_url_override(mut self, value: impl Into<String>) -> Self {
        self.data_url_override = Some(value.into());
        self
    }

    pub fn text_key(mut self, value: impl Into<String>) -> Self {
        self.text_key = value.into();
        self
    }

    pub fn max_batch_size(mut self, value: usize) -> Self {
        self.max_batch_size = value;
        self
    }

    /// Serverless placement for newly created indexes.
    pub fn serverless(mut self, cloud: impl Into<String>, region: impl Into<String>) -> Self {
        self.cloud = cloud.into();
        self.region = region.into();
        self
    }

    pub fn ready_timeout(mut self, value: Duration) -> Self {
        self.ready_timeout = value;
        self
    }

    pub fn ready_poll_interval(mut self, value: Duration) -> Self {
        self.ready_poll_interval = value;
        self
    }

    pub fn build(self) -> Result<PineconeCollectionStore, PineconeStoreError> {
        let api_key = self
            .api_key
            .ok_or_else(|| PineconeStoreError::Config("api_key is required".to_string()))?;
        if self.max_batch_size == 0 {
            return Err(PineconeStoreError::Config(
                "max_batch_size must be greater than 0".to_string(),
            ));
        }

        let control = PineconeHttpClient::new(self.control_url, api_key)?;
        Ok(PineconeCollectionStore::new(
            control,
            self.data_url_override,
            self.text_key,
            self.max_batch_size,
            self.cloud,
            self.region,
            self.ready_timeout,
            self.ready_poll_interval,
        ))
    }
}
