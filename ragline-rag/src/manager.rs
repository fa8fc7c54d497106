use std::sync::Arc;

use tokio::sync::Mutex;

use ragline_core::{ChatLlm, CollectionStore, Embedding, RaglineError, StoreError};
use ragline_memory::ChatMemoryBuffer;

use crate::{ChatSession, RagConfig};

struct ActiveSession {
    collection_id: String,
    session: ChatSession,
}

/// Single-slot cache of the active chat session. At most one session exists
/// at a time; asking for a different collection swaps it out, discarding the
/// previous session's memory.
///
/// The check-and-swap and the subsequent turn run under the slot lock, so
/// two concurrent chat requests for different collections cannot corrupt
/// which collection an answer came from.
pub struct SessionManager {
    slot: Mutex<Option<ActiveSession>>,
    store: Arc<dyn CollectionStore>,
    embedder: Arc<dyn Embedding>,
    llm: Arc<dyn ChatLlm>,
    top_k: usize,
    memory_token_budget: usize,
}

impl SessionManager {
    pub fn new(
        config: &RagConfig,
        store: Arc<dyn CollectionStore>,
        embedder: Arc<dyn Embedding>,
        llm: Arc<dyn ChatLlm>,
    ) -> Self {
        Self {
            slot: Mutex::new(None),
            store,
            embedder,
            llm,
            top_k: config.top_k,
            memory_token_budget: config.memory_token_budget,
        }
    }

    /// Collection id of the currently active session, if any.
    pub async fn active_collection(&self) -> Option<String> {
        let slot = self.slot.lock().await;
        slot.as_ref().map(|active| active.collection_id.clone())
    }

    /// Transcript length of the active session's memory, if any. Exposed so
    /// callers (and tests) can observe reuse-versus-rebuild without poking
    /// at the session itself.
    pub async fn active_memory_len(&self) -> Option<usize> {
        let slot = self.slot.lock().await;
        slot.as_ref().map(|active| active.session.memory().len())
    }

    pub async fn chat(&self, collection_id: &str, query: &str) -> Result<String, RaglineError> {
        let mut slot = self.slot.lock().await;

        let reuse = matches!(
            slot.as_ref(),
            Some(active) if active.collection_id == collection_id
        );
        if !reuse {
            tracing::info!(collection = collection_id, "swapping active chat session");
            let collection =
                self.store
                    .open_collection(collection_id)
                    .await
                    .map_err(|err| match err {
                        StoreError::NotFound(name) => RaglineError::NotFound(name),
                        other => RaglineError::from(other),
                    })?;
            let session = ChatSession::new(
                collection_id.to_string(),
                collection,
                self.embedder.clone(),
                self.llm.clone(),
                ChatMemoryBuffer::new(self.memory_token_budget),
                self.top_k,
            );
            *slot = Some(ActiveSession {
                collection_id: collection_id.to_string(),
                session,
            });
        }

        let Some(active) = slot.as_mut() else {
            return Err(RaglineError::Invariant(
                "active session slot empty after swap".to_string(),
            ));
        };
        active.session.respond(query).await
    }
}
