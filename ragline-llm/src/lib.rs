mod ollama;

pub use ollama::OllamaClient;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;
