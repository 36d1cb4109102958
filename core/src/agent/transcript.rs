//! Append-only conversation history

use crate::llm::LlmMessage;

/// Ordered messages of one session
///
/// Entries are never removed or reordered. There is no size cap, so a long
/// session grows without bound.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<LlmMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: LlmMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[LlmMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&LlmMessage> {
        self.messages.last()
    }
}
