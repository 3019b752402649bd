//! Session state for the text-processing conversation.

use serde::{Deserialize, Serialize};

use crate::ports::{Message, MessageRole};

/// Upper bound on stored history: the system message plus two exchanges.
pub const MAX_HISTORY_LEN: usize = 5;

/// State of a text-processing session.
///
/// Holds just enough context to continue the running-total conversation:
/// the last assistant response and a capped message history. When non-empty,
/// the history always begins with the system message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Last response from the assistant.
    #[serde(default)]
    pub last_response: String,

    /// Conversation history, capped at [`MAX_HISTORY_LEN`] entries.
    #[serde(default)]
    pub history: Vec<Message>,
}

impl SessionState {
    /// Creates empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one user/assistant exchange.
    ///
    /// Seeds the history with the system message on first use, then trims to
    /// the system message plus the last two exchanges.
    pub fn record_exchange(&mut self, system_prompt: &str, user_text: &str, response: &str) {
        if self.history.is_empty() {
            self.history.push(Message::system(system_prompt));
        }

        self.history.push(Message::user(user_text));
        self.history.push(Message::assistant(response.trim()));

        if self.history.len() > MAX_HISTORY_LEN {
            let tail_start = self.history.len() - (MAX_HISTORY_LEN - 1);
            let mut trimmed = Vec::with_capacity(MAX_HISTORY_LEN);
            trimmed.push(self.history[0].clone());
            trimmed.extend_from_slice(&self.history[tail_start..]);
            self.history = trimmed;
        }

        self.last_response = response.trim().to_string();
    }

    /// Returns the conversational turns (user/assistant), excluding the
    /// stored system message. Used when rebuilding a completion request,
    /// where the system prompt travels separately.
    pub fn turns(&self) -> impl Iterator<Item = &Message> {
        self.history
            .iter()
            .filter(|m| m.role != MessageRole::System)
    }
}
