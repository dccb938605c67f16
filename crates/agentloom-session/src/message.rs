//! Conversation log entries and the per-reply lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MessageId, Role};

/// Lifecycle of an assistant reply. Transitions only move forward:
/// `Pending -> Streaming -> Done | Errored`, or straight from `Pending`
/// to a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyState {
    /// Placeholder created, no fragment yet.
    Pending,
    /// At least one fragment applied.
    Streaming,
    Done,
    Errored,
}

impl ReplyState {
    pub fn is_streaming(self) -> bool {
        matches!(self, ReplyState::Pending | ReplyState::Streaming)
    }

    pub fn is_terminal(self) -> bool {
        !self.is_streaming()
    }
}

/// One entry in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
    /// `None` for user messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reply: Option<ReplyState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    agent_used: Option<String>,
}

impl Message {
    pub(crate) fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            reply: None,
            agent_used: None,
        }
    }

    /// Empty assistant message that a reply stream will fill in.
    pub(crate) fn placeholder(agent: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::Assistant,
            content: String::new(),
            timestamp: Utc::now(),
            reply: Some(ReplyState::Pending),
            agent_used: Some(agent.into()),
        }
    }

    /// Append a fragment. Returns `false` (and changes nothing) unless the
    /// message is a reply that is still streaming.
    pub(crate) fn push_fragment(&mut self, text: &str) -> bool {
        match self.reply {
            Some(state) if state.is_streaming() => {
                self.content.push_str(text);
                self.reply = Some(ReplyState::Streaming);
                true
            }
            _ => false,
        }
    }

    /// Mark the reply done. A non-empty `full_text` replaces the streamed
    /// content so the final body appears exactly once.
    pub(crate) fn complete(&mut self, full_text: &str) -> bool {
        match self.reply {
            Some(state) if state.is_streaming() => {
                if !full_text.is_empty() {
                    self.content = full_text.to_string();
                }
                self.reply = Some(ReplyState::Done);
                true
            }
            _ => false,
        }
    }

    /// Mark the reply errored, keeping whatever content already arrived.
    pub(crate) fn fail(&mut self) -> bool {
        match self.reply {
            Some(state) if state.is_streaming() => {
                self.reply = Some(ReplyState::Errored);
                true
            }
            _ => false,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn reply_state(&self) -> Option<ReplyState> {
        self.reply
    }

    pub fn is_streaming(&self) -> bool {
        self.reply.is_some_and(ReplyState::is_streaming)
    }

    pub fn agent_used(&self) -> Option<&str> {
        self.agent_used.as_deref()
    }

    pub fn to_history(&self) -> HistoryEntry {
        HistoryEntry {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// Role + text pair sent to the backend as conversation context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}
