//! Notifications a `Session` publishes for UI observers.

use serde::{Deserialize, Serialize};

use crate::{MessageId, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SessionEvent {
    MessageAppended { id: MessageId, role: Role },
    /// Content of a streaming reply grew.
    ReplyUpdated { id: MessageId },
    ReplyFinished { id: MessageId, ok: bool },
    LoadingChanged(bool),
    Cleared,
    AgentChanged(String),
    ContextChanged(Option<String>),
}
