//! Conversation session engine for agentloom.
//!
//! Provides:
//! - `Session`, the owner of an ordered message log that folds
//!   incrementally streamed agent replies into place
//! - the `ReplyTransport` contract a backend connection must satisfy
//! - `HttpTransport`, an SSE client for the agent chat endpoint

pub mod events;
pub mod http;
pub mod message;
pub mod session;
pub mod streaming;
pub mod transport;

pub use agentloom_common::{MessageId, SessionId};
pub use events::SessionEvent;
pub use http::{HttpTransport, HttpTransportConfig};
pub use message::{HistoryEntry, Message, ReplyState};
pub use session::{Applied, Session, SessionUpdate, SubmitGate};
pub use transport::{ReplyEvent, ReplyRequest, ReplyStream, ReplyTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Failure of one reply exchange. Always terminal for that exchange.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Timeout")]
    Timeout,
    #[error("Reply was empty")]
    EmptyReply,
    #[error("Reply stream ended before completion")]
    Interrupted,
    #[error("Cancelled")]
    Cancelled,
}

/// Reasons `Session::submit` declines to send anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("submission rejected: {0}")]
    Rejected(String),
}

impl From<SessionError> for agentloom_common::AgentloomError {
    fn from(err: SessionError) -> Self {
        agentloom_common::AgentloomError::Session(err.to_string())
    }
}

impl From<TransportError> for agentloom_common::AgentloomError {
    fn from(err: TransportError) -> Self {
        agentloom_common::AgentloomError::Transport(err.to_string())
    }
}
