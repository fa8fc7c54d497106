//! Pinecone collection store adapter for Ragline.
//!
//! Implements the `CollectionStore`/`Collection` traits on top of the
//! Pinecone HTTP API:
//! - control plane (`https://api.pinecone.io`): list, describe, create and
//!   delete serverless indexes; `ensure_collection` is delete-then-create,
//!   so re-ingesting a name fully supersedes prior content,
//! - data plane (per-index host): `/vectors/upsert` and `/query`, with node
//!   content carried in metadata under a configurable text key.
//!
//! Environment variables commonly used:
//! - `PINECONE_API_KEY`
//! - `PINECONE_CONTROL_URL` (tests and self-hosted gateways)

pub mod client;
mod collection;
mod config;
mod error;
pub mod mapper;
mod store;
mod types;

pub use collection::PineconeCollection;
pub use config::PineconeStoreBuilder;
pub use error::PineconeStoreError;
pub use store::PineconeCollectionStore;
