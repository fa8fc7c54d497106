use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::PineconeStoreError;

/// Thin authenticated JSON client shared by the control plane and the
/// per-index data plane.
#[derive(Clone, Debug)]
pub struct PineconeHttpClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl PineconeHttpClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self, PineconeStoreError> {
        if api_key.trim().is_empty() {
            return Err(PineconeStoreError::Config(
                "api_key cannot be empty".to_string(),
            ));
        }

        reqwest::Url::parse(&base_url)
            .map_err(|err| PineconeStoreError::Config(format!("invalid base_url: {err}")))?;

        Ok(Self {
            http: Client::new(),
            base_url,
            api_key,
        })
    }

    /// Rebinds this client to a different base URL, keeping credentials.
    /// Used to derive a data-plane client from the control-plane one.
    pub fn with_base_url(&self, base_url: String) -> Result<Self, PineconeStoreError> {
        Self::new(base_url, self.api_key.clone())
    }

    pub async fn get_typed<Resp>(&self, path: &str) -> Result<Resp, PineconeStoreError>
    where
        Resp: DeserializeOwned,
    {
        self.request_typed(Method::GET, path, None::<&Value>, None, None)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<(), PineconeStoreError> {
        let _: Value = self
            .request_typed(Method::DELETE, path, None::<&Value>, None, None)
            .await?;
        Ok(())
    }

    pub async fn post_typed<Req, Resp>(
        &self,
        path: &str,
        payload: &Req,
    ) -> Result<Resp, PineconeStoreError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        self.request_typed(Method::POST, path, Some(payload), None, None)
            .await
    }

    pub async fn post_typed_with_context<Req, Resp>(
        &self,
        path: &str,
        payload: &Req,
        index: Option<&str>,
        batch_size: Option<usize>,
    ) -> Result<Resp, PineconeStoreError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        self.request_typed(Method::POST, path, Some(payload), index, batch_size)
            .await
    }

    async fn request_typed<Req, Resp>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Req>,
        index: Option<&str>,
        batch_size: Option<usize>,
    ) -> Result<Resp, PineconeStoreError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut request = self
            .http
            .request(method, url)
            .header("Api-Key", &self.api_key)
            .header("Content-Type", "application/json");
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|err| PineconeStoreError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|err| PineconeStoreError::Transport(err.to_string()))?;
            // Delete returns 202/204 with no body.
            if bytes.is_empty() {
                return serde_json::from_value(Value::Object(serde_json::Map::new()))
                    .map_err(|err| PineconeStoreError::Malformed(err.to_string()));
            }
            return serde_json::from_slice(&bytes)
                .map_err(|err| PineconeStoreError::Malformed(err.to_string()));
        }

        let body: Value = response
            .json::<Value>()
            .await
            .unwrap_or_else(|_| Value::String(String::new()));
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| {
                body.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
            })
            .or_else(|| body.get("error").and_then(Value::as_str))
            .unwrap_or("unknown pinecone error")
            .to_string();

        Err(PineconeStoreError::Api {
            status: status.as_u16(),
            message,
            index: index.map(ToOwned::to_owned),
            batch_size,
        })
    }
}
