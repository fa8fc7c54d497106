use ragline_core::Message;

use crate::DEFAULT_TOKEN_BUDGET;

/// Token-budgeted transcript of prior chat turns. One turn is a (user,
/// assistant) message pair; when the approximate token total exceeds the
/// budget the oldest turns are evicted first. The most recent turn is never
/// evicted, even if it alone is over budget.
#[derive(Clone, Debug)]
pub struct ChatMemoryBuffer {
    messages: Vec<Message>,
    token_budget: usize,
}

impl Default for ChatMemoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_BUDGET)
    }
}

impl ChatMemoryBuffer {
    pub fn new(token_budget: usize) -> Self {
        Self {
            messages: Vec::new(),
            token_budget,
        }
    }

    pub fn token_budget(&self) -> usize {
        self.token_budget
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Records one completed turn, then trims whole turns from the front
    /// until the transcript fits the budget again.
    pub fn push_turn(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.messages.push(Message::user(user));
        self.messages.push(Message::assistant(assistant));
        self.trim();
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn trim(&mut self) {
        while self.messages.len() > 2 && self.approximate_tokens() > self.token_budget {
            // Turns are appended in pairs, so the front is always a pair
            // boundary.
            self.messages.drain(0..2);
        }
    }

    fn approximate_tokens(&self) -> usize {
        self.messages
            .iter()
            .map(|message| approximate_token_count(&message.content))
            .sum()
    }
}

/// Rough chars/4 heuristic. Good enough to keep the transcript near the
/// model's context budget; a tokenizer-exact count is not worth the
/// dependency here.
fn approximate_token_count(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}
