use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ragline_core::{
    ChatLlm, Collection, CollectionStore, Embedding, GenerationError, Message, Metric, Node,
    RaglineError,
};
use ragline_embeddings::HashEmbedder;
use ragline_rag::{InMemoryCollectionStore, RagConfig, SessionManager};

#[derive(Default)]
struct ToggleLlm {
    fail: AtomicBool,
}

impl ToggleLlm {
    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl ChatLlm for ToggleLlm {
    async fn chat(&self, messages: &[Message]) -> Result<String, GenerationError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(GenerationError::Provider("backend unreachable".to_string()));
        }
        let query = messages.last().map(|m| m.content.as_str()).unwrap_or("");
        Ok(format!("answer to: {query}"))
    }
}

async fn seed_collection(store: &InMemoryCollectionStore, name: &str, texts: &[&str]) {
    let embedder = HashEmbedder::new(8);
    let collection = store
        .ensure_collection(name, 8, Metric::DotProduct)
        .await
        .unwrap();
    let mut nodes = Vec::new();
    for text in texts {
        let mut node = Node::new(*text, HashMap::new());
        node.embedding = Some(embedder.embed(text).await.unwrap());
        nodes.push(node);
    }
    collection.upsert(nodes).await.unwrap();
}

async fn manager_with_collections() -> (SessionManager, Arc<ToggleLlm>) {
    let store = InMemoryCollectionStore::new();
    seed_collection(&store, "col-a", &["alpha facts", "more alpha"]).await;
    seed_collection(&store, "col-b", &["beta facts"]).await;

    let llm = Arc::new(ToggleLlm::default());
    let manager = SessionManager::new(
        &RagConfig::default(),
        Arc::new(store),
        Arc::new(HashEmbedder::new(8)),
        llm.clone(),
    );
    (manager, llm)
}

#[tokio::test]
async fn repeated_chats_to_same_collection_reuse_the_session() {
    let (manager, _llm) = manager_with_collections().await;

    manager.chat("col-a", "first question").await.unwrap();
    assert_eq!(manager.active_memory_len().await, Some(2));

    manager.chat("col-a", "second question").await.unwrap();
    // Memory grew instead of being rebuilt.
    assert_eq!(manager.active_memory_len().await, Some(4));
    assert_eq!(manager.active_collection().await, Some("col-a".to_string()));
}

#[tokio::test]
async fn chatting_to_another_collection_swaps_and_discards_memory() {
    let (manager, _llm) = manager_with_collections().await;

    manager.chat("col-a", "question one").await.unwrap();
    manager.chat("col-a", "question two").await.unwrap();
    assert_eq!(manager.active_memory_len().await, Some(4));

    manager.chat("col-b", "about beta").await.unwrap();
    assert_eq!(manager.active_collection().await, Some("col-b".to_string()));
    assert_eq!(manager.active_memory_len().await, Some(2));
}

#[tokio::test]
async fn returning_to_a_previous_collection_rebuilds_with_empty_memory() {
    let (manager, _llm) = manager_with_collections().await;

    manager.chat("col-a", "question one").await.unwrap();
    manager.chat("col-b", "about beta").await.unwrap();
    manager.chat("col-a", "back to alpha").await.unwrap();

    // The earlier col-a session was discarded when col-b took the slot, so
    // this is a fresh session holding only the latest turn.
    assert_eq!(manager.active_collection().await, Some("col-a".to_string()));
    assert_eq!(manager.active_memory_len().await, Some(2));
}

#[tokio::test]
async fn failed_generation_leaves_memory_unchanged() {
    let (manager, llm) = manager_with_collections().await;

    manager.chat("col-a", "question one").await.unwrap();
    assert_eq!(manager.active_memory_len().await, Some(2));

    llm.set_failing(true);
    let err = manager.chat("col-a", "doomed question").await.unwrap_err();
    assert!(matches!(err, RaglineError::Generation(_)));
    assert_eq!(manager.active_memory_len().await, Some(2));

    // A retry after recovery picks up exactly where history left off.
    llm.set_failing(false);
    manager.chat("col-a", "retried question").await.unwrap();
    assert_eq!(manager.active_memory_len().await, Some(4));
}

#[tokio::test]
async fn chat_against_unknown_collection_is_not_found() {
    let (manager, _llm) = manager_with_collections().await;

    let err = manager.chat("ghost", "anyone there?").await.unwrap_err();
    assert!(err.is_not_found());
    // The slot is untouched by the failed swap.
    assert_eq!(manager.active_collection().await, None);
}
