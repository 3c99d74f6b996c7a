//! Conversation transcript sent to the completion service.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Author of a transcript message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Standing instructions.
    System,
    /// Board updates and corrective feedback.
    User,
    /// The agent's own replies.
    Assistant,
}

/// A role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Message {
    /// Who wrote it.
    role: Role,
    /// Message text.
    content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Append-only message log for one agent over a whole game.
///
/// Every request carries the full log, so the agent sees its earlier answers
/// and any corrections. Nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates a transcript seeded with a system message.
    #[instrument(skip(system))]
    pub fn new(system: impl Into<String>) -> Self {
        let mut transcript = Self::default();
        transcript.push(Role::System, system);
        transcript
    }

    /// Appends a message.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        let message = Message::new(role, content);
        debug!(
            %role,
            content_length = message.content.len(),
            transcript_length = self.messages.len() + 1,
            "Appending to transcript"
        );
        self.messages.push(message);
    }

    /// Appends a `user` message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Role::User, content);
    }

    /// Appends an `assistant` message.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content);
    }

    /// All messages in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages written by `role`.
    pub fn count(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }

    /// Total characters across all messages.
    pub fn content_length(&self) -> usize {
        self.messages.iter().map(|m| m.content.len()).sum()
    }
}
