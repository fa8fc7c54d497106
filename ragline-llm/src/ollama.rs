use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use ragline_core::{ChatLlm, GenerationError, Message};

use crate::DEFAULT_REQUEST_TIMEOUT_SECS;

/// Ollama chat backend. One client is shared by every chat session; the
/// request timeout covers the whole generation call.
#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    timeout: Duration,
    http: Client,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String) -> Result<Self, GenerationError> {
        Self::with_timeout(
            base_url,
            model,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| GenerationError::Provider(err.to_string()))?;
        Ok(Self {
            base_url,
            model,
            timeout,
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    fn map_transport_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else {
            GenerationError::Provider(err.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

#[async_trait::async_trait]
impl ChatLlm for OllamaClient {
    async fn chat(&self, messages: &[Message]) -> Result<String, GenerationError> {
        let request = OllamaChatRequest {
            model: &self.model,
            messages,
            stream: false,
        };

        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let response: OllamaChatResponse = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?
            .error_for_status()
            .map_err(|err| GenerationError::Provider(err.to_string()))?
            .json()
            .await
            .map_err(|err| GenerationError::Malformed(err.to_string()))?;

        Ok(response.message.content)
    }
}
