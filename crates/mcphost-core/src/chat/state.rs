//! Conversation history

use serde::{Deserialize, Serialize};

use crate::types::ChatMessage;

/// Ordered, append-only sequence of chat turns
///
/// Only [`ChatClient::process_query`](super::ChatClient::process_query)
/// appends to it, and only once a whole round has succeeded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    messages: Vec<ChatMessage>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing history, e.g. a system prompt
    pub fn with_messages(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub(crate) fn commit(&mut self, staged: Vec<ChatMessage>) {
        self.messages.extend(staged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_appends_in_order() {
        let mut state = ConversationState::with_messages(vec![ChatMessage::system("be brief")]);
        state.commit(vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")]);

        assert_eq!(state.len(), 3);
        assert_eq!(state.messages()[1], ChatMessage::user("hi"));
        assert_eq!(state.last(), Some(&ChatMessage::assistant("hello")));
    }
}
