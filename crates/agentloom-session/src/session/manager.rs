//! Session struct and conversation state.

use std::collections::HashMap;

use agentloom_common::EventBus;
use futures_util::stream::SelectAll;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{Message, MessageId, SessionEvent, SessionId, TransportError};

use super::store::MessageLog;
use super::types::{SubmitGate, TaggedStream};

const EVENT_CAPACITY: usize = 256;

/// A conversation with one backend: the message log, the agent/context
/// selection, and every reply still streaming in.
pub struct Session {
    /// Conversation message log.
    pub(super) log: MessageLog,
    /// Backend conversation handle, adopted from the first completed reply.
    pub(super) session_id: Option<SessionId>,
    /// Agent the next submission is addressed to.
    pub(super) current_agent: String,
    /// Optional project/entity scope for the next submission.
    pub(super) current_context: Option<String>,
    /// Waiting for the first sign of a reply.
    pub(super) is_loading: bool,
    pub(super) last_error: Option<TransportError>,
    /// Cap on history entries sent per request.
    pub(super) history_limit: Option<usize>,
    pub(super) cancel_on_clear: bool,
    pub(super) gate: Option<SubmitGate>,
    /// Cancellation handle per reply that has not reached a terminal event.
    pub(super) in_flight: HashMap<MessageId, CancellationToken>,
    pub(super) streams: SelectAll<TaggedStream>,
    pub(super) events: EventBus<SessionEvent>,
}

impl Session {
    pub fn new(agent: impl Into<String>) -> Self {
        Self {
            log: MessageLog::default(),
            session_id: None,
            current_agent: agent.into(),
            current_context: None,
            is_loading: false,
            last_error: None,
            history_limit: None,
            cancel_on_clear: false,
            gate: None,
            in_flight: HashMap::new(),
            streams: SelectAll::new(),
            events: EventBus::new(EVENT_CAPACITY),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.current_context = Some(context.into());
        self
    }

    /// Send at most `limit` of the most recent log entries as history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Abort in-flight replies on `clear` instead of letting them finish
    /// unobserved.
    pub fn with_cancel_on_clear(mut self, cancel: bool) -> Self {
        self.cancel_on_clear = cancel;
        self
    }

    pub fn with_gate(mut self, gate: SubmitGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Select the agent for the next submission. Replies already streaming
    /// are unaffected.
    pub fn set_agent(&mut self, agent: impl Into<String>) {
        self.current_agent = agent.into();
        self.events
            .publish(SessionEvent::AgentChanged(self.current_agent.clone()));
    }

    /// Scope the next submission to a project, or unscope it with `None`.
    pub fn set_context(&mut self, context: Option<String>) {
        self.current_context = context;
        self.events
            .publish(SessionEvent::ContextChanged(self.current_context.clone()));
    }

    /// Empty the log and forget the backend session handle. Agent and
    /// context selection survive.
    pub fn clear(&mut self) {
        if self.cancel_on_clear {
            for (id, token) in self.in_flight.drain() {
                debug!(message_id = %id, "cancelling reply on clear");
                token.cancel();
            }
        }
        self.log.clear();
        self.session_id = None;
        self.last_error = None;
        self.set_loading(false);
        self.events.publish(SessionEvent::Cleared);
    }

    /// Abort one in-flight reply. The message keeps its partial content and
    /// ends up errored. Returns `false` if the reply was not in flight.
    ///
    /// Cancelling a reply whose message was cleared only stops the stream;
    /// session state belongs to newer submissions and is left alone.
    pub fn cancel(&mut self, id: &MessageId) -> bool {
        let Some(token) = self.in_flight.remove(id) else {
            return false;
        };
        token.cancel();
        debug!(message_id = %id, "reply cancelled");

        let failed = self.log.get_mut(id).is_some_and(|message| message.fail());
        if failed {
            self.last_error = Some(TransportError::Cancelled);
            self.events.publish(SessionEvent::ReplyFinished {
                id: id.clone(),
                ok: false,
            });
            self.set_loading(false);
        }
        true
    }

    pub(super) fn set_loading(&mut self, loading: bool) {
        if self.is_loading != loading {
            self.is_loading = loading;
            self.events.publish(SessionEvent::LoadingChanged(loading));
        }
    }

    /// Get the full conversation log.
    pub fn messages(&self) -> &[Message] {
        self.log.as_slice()
    }

    pub fn message(&self, id: &MessageId) -> Option<&Message> {
        self.log.get(id)
    }

    /// Number of messages in the log.
    pub fn message_count(&self) -> usize {
        self.log.as_slice().len()
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn current_agent(&self) -> &str {
        &self.current_agent
    }

    pub fn current_context(&self) -> Option<&str> {
        self.current_context.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Most recent reply failure, reset by `clear`.
    pub fn last_error(&self) -> Option<&TransportError> {
        self.last_error.as_ref()
    }

    /// Replies that have not reached a terminal event yet, including ones
    /// whose messages were cleared.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Whether `next_update` has streams to poll. Stays true until the last
    /// finished stream has been polled once more and dropped.
    pub fn has_in_flight(&self) -> bool {
        !self.streams.is_empty()
    }

    /// Newest message that is still streaming.
    pub fn latest_streaming(&self) -> Option<&MessageId> {
        self.log
            .as_slice()
            .iter()
            .rev()
            .find(|m| m.is_streaming())
            .map(Message::id)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
