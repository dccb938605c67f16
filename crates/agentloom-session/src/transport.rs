//! The contract between a `Session` and whatever delivers agent replies.

use std::sync::Arc;

use futures_util::stream::{BoxStream, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::{HistoryEntry, SessionId, TransportError};

/// One item of a reply stream.
///
/// A well-formed stream yields any number of `Fragment`s followed by exactly
/// one terminal event (`Complete` or `Error`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyEvent {
    Fragment(String),
    Complete {
        full_text: String,
        /// Server-side conversation handle, if the backend assigned one.
        session_id: Option<SessionId>,
    },
    Error(TransportError),
}

impl ReplyEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReplyEvent::Fragment(_))
    }
}

pub type ReplyStream = BoxStream<'static, ReplyEvent>;

/// Everything the backend needs to produce one reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyRequest {
    #[serde(rename = "message")]
    pub message_text: String,
    pub agent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    /// Full turn sequence, ending with the message being sent.
    pub history: Vec<HistoryEntry>,
}

/// Starts reply exchanges.
///
/// `stream_reply` must return immediately; all network work happens as the
/// returned stream is polled or on tasks the transport spawns itself.
pub trait ReplyTransport: Send + Sync {
    fn stream_reply(&self, request: ReplyRequest) -> ReplyStream;
}

impl<T: ReplyTransport + ?Sized> ReplyTransport for Arc<T> {
    fn stream_reply(&self, request: ReplyRequest) -> ReplyStream {
        (**self).stream_reply(request)
    }
}

/// Turn the receiving half of a channel into a `ReplyStream`. The stream
/// ends once every sender is dropped and the buffer is drained.
pub fn channel_stream(rx: mpsc::UnboundedReceiver<ReplyEvent>) -> ReplyStream {
    futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|event| (event, rx))
    })
    .boxed()
}
