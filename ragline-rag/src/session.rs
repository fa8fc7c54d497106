use std::sync::Arc;

use ragline_core::{ChatLlm, Collection, Embedding, Message, RaglineError, ScoredNode};
use ragline_memory::ChatMemoryBuffer;

/// One conversational session bound to exactly one collection. Binding
/// happens at construction and never changes; talking to a different
/// collection means discarding the session and building a new one.
pub struct ChatSession {
    collection_id: String,
    collection: Box<dyn Collection>,
    embedder: Arc<dyn Embedding>,
    llm: Arc<dyn ChatLlm>,
    memory: ChatMemoryBuffer,
    top_k: usize,
}

impl ChatSession {
    pub fn new(
        collection_id: String,
        collection: Box<dyn Collection>,
        embedder: Arc<dyn Embedding>,
        llm: Arc<dyn ChatLlm>,
        memory: ChatMemoryBuffer,
        top_k: usize,
    ) -> Self {
        Self {
            collection_id,
            collection,
            embedder,
            llm,
            memory,
            top_k,
        }
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub fn memory(&self) -> &ChatMemoryBuffer {
        &self.memory
    }

    /// One chat turn: retrieve the top-k nodes for the query, generate an
    /// answer grounded in them plus the running transcript, then record the
    /// turn. A failed turn leaves the memory exactly as it was, so retrying
    /// is idempotent with respect to history.
    pub async fn respond(&mut self, query: &str) -> Result<String, RaglineError> {
        let span = tracing::info_span!(
            "chat_turn",
            collection = %self.collection_id,
            top_k = self.top_k,
        );
        let _guard = span.enter();

        let query_embedding = self.embedder.embed(query).await?;
        let retrieved = self.collection.query(&query_embedding, self.top_k).await?;
        tracing::debug!(retrieved = retrieved.len(), "context nodes retrieved");

        let mut messages = Vec::with_capacity(self.memory.len() + 2);
        messages.push(Message::system(context_prompt(&retrieved)));
        messages.extend_from_slice(self.memory.messages());
        messages.push(Message::user(query));

        let answer = self.llm.chat(&messages).await?;

        self.memory.push_turn(query, &answer);
        Ok(answer)
    }
}

fn context_prompt(retrieved: &[ScoredNode]) -> String {
    let mut prompt = String::from(
        "You are a helpful assistant answering questions about a set of \
         uploaded documents. Use only the context below and the conversation \
         so far; if the context does not contain the answer, say so.\n\n\
         Context:\n",
    );
    if retrieved.is_empty() {
        prompt.push_str("(no relevant passages found)\n");
    }
    for scored in retrieved {
        prompt.push_str("---\n");
        prompt.push_str(&scored.node.content);
        prompt.push('\n');
    }
    prompt
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ragline_core::Node;

    use super::*;

    #[test]
    fn context_prompt_includes_retrieved_passages() {
        let retrieved = vec![ScoredNode {
            node: Node::new("the sky is blue", HashMap::new()),
            score: 0.9,
        }];
        let prompt = context_prompt(&retrieved);
        assert!(prompt.contains("the sky is blue"));
    }

    #[test]
    fn context_prompt_handles_empty_retrieval() {
        let prompt = context_prompt(&[]);
        assert!(prompt.contains("no relevant passages"));
    }
}
