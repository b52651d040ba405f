//! Conversation transcript and turn state

use crate::error::{Error, Result};
use crate::types::Message;

/// Turn lifecycle. A turn either completes, leaving the reply in the
/// transcript, or fails and is rolled back; both return to `Idle` and the
/// next turn starts a fresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TurnState {
    #[default]
    Idle,
    Streaming,
}

/// In-memory transcript with single-active-turn semantics.
///
/// The transcript is append-only: once a turn completes, its messages are
/// never reordered or dropped. While a turn streams, exactly one assistant
/// message is in progress and is the sole mutation target for deltas.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    state: TurnState,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation pre-seeded with an assistant greeting
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
            state: TurnState::Idle,
        }
    }

    /// All transcript messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a turn is currently streaming
    pub fn is_streaming(&self) -> bool {
        self.state == TurnState::Streaming
    }

    /// Start a turn: append the user message and an empty reply placeholder.
    ///
    /// Rejects with [`Error::TurnInProgress`] while another turn streams.
    /// Transcript state is single-writer; overlapping turns would
    /// interleave deltas into the same placeholder.
    pub fn begin_turn(&mut self, input: impl Into<String>) -> Result<()> {
        if self.state == TurnState::Streaming {
            return Err(Error::TurnInProgress);
        }
        self.messages.push(Message::user(input));
        self.messages.push(Message::assistant(String::new()));
        self.state = TurnState::Streaming;
        Ok(())
    }

    /// Messages to send to the endpoint: the full history including the
    /// new user message, excluding the in-progress placeholder.
    pub fn outbound(&self) -> &[Message] {
        match self.state {
            TurnState::Streaming => &self.messages[..self.messages.len() - 1],
            TurnState::Idle => &self.messages,
        }
    }

    /// Overwrite the in-progress reply with the accumulated content
    pub fn apply_update(&mut self, content: &str) {
        debug_assert_eq!(self.state, TurnState::Streaming);
        if let Some(last) = self.messages.last_mut() {
            last.content.clear();
            last.content.push_str(content);
        }
    }

    /// Finish the turn, keeping the reply in the transcript permanently
    pub fn complete_turn(&mut self) {
        self.state = TurnState::Idle;
    }

    /// Roll the turn back: the placeholder is removed, the user message stays
    pub fn fail_turn(&mut self) {
        if self.state == TurnState::Streaming {
            self.messages.pop();
        }
        self.state = TurnState::Idle;
    }
}
