use std::time::Duration;

use ragline::{ollama_chat, ollama_embedding, Embedding, RagConfig};

#[test]
fn embedding_provider_uses_the_configured_model() {
    let config = RagConfig {
        embedding_model: "nomic-embed-text".to_string(),
        ..RagConfig::default()
    };

    let embedder = ollama_embedding(&config, "http://localhost:11434", 768);
    assert_eq!(embedder.model(), "nomic-embed-text");
    assert_eq!(embedder.dimension(), 768);
}

#[test]
fn chat_backend_uses_the_configured_model_and_timeout() {
    let config = RagConfig {
        chat_model: "llama3.2:latest".to_string(),
        llm_request_timeout: Duration::from_secs(30),
        ..RagConfig::default()
    };

    let client = ollama_chat(&config, "http://localhost:11434").unwrap();
    assert_eq!(client.model(), "llama3.2:latest");
    assert_eq!(client.request_timeout(), Duration::from_secs(30));
}
