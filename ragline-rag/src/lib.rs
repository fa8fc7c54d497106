//! The core of Ragline: document ingestion (chunk, enrich, embed, upsert)
//! and retrieval-augmented chat over a single active collection.
//!
//! The HTTP transport lives above this crate; [`RagService`] is the contract
//! it consumes: `ingest` (fire-and-forget), `list_collections`,
//! `delete_collection`, `chat`.

mod config;
mod error;
mod in_memory;
mod loader;
mod manager;
mod nodes;
mod pipeline;
mod queue;
mod service;
mod session;
mod splitter;

pub use config::RagConfig;
pub use error::IngestionError;
pub use in_memory::InMemoryCollectionStore;
pub use loader::DirectoryLoader;
pub use manager::SessionManager;
pub use nodes::build_nodes;
pub use pipeline::{IngestReport, IngestionPipeline};
pub use queue::IngestQueue;
pub use service::RagService;
pub use session::ChatSession;
pub use splitter::SentenceSplitter;
