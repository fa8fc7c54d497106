mod document;
mod embedding;
mod error;
mod llm;
mod loader;
mod store;
mod value;

pub use document::{Document, Node, ScoredNode};
pub use embedding::Embedding;
pub use error::{EmbeddingError, GenerationError, LoadError, RaglineError, StoreError};
pub use llm::{ChatLlm, Message, Role};
pub use loader::DocumentLoader;
pub use store::{Collection, CollectionStore, Metric};
pub use value::Value;
