//! Submitting messages and folding reply streams into the log.

use futures_util::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{
    Message, MessageId, ReplyEvent, ReplyRequest, ReplyStream, ReplyTransport, Role,
    SessionError, SessionEvent, SessionId, TransportError,
};

use super::manager::Session;
use super::types::{Applied, SessionUpdate, TaggedStream};

impl Session {
    /// Append `content` as a user message, open a placeholder reply, and
    /// dispatch the request. Returns the placeholder's id without waiting
    /// for the reply; drive it with [`Session::next_update`].
    ///
    /// Earlier replies may still be streaming; they keep filling their own
    /// placeholders.
    pub fn submit(
        &mut self,
        transport: &dyn ReplyTransport,
        content: impl Into<String>,
    ) -> Result<MessageId, SessionError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        if let Some(ref gate) = self.gate {
            gate(&content).map_err(SessionError::Rejected)?;
        }

        let user_id = self.log.push(Message::user(content.clone()));
        self.events.publish(SessionEvent::MessageAppended {
            id: user_id,
            role: Role::User,
        });
        self.set_loading(true);

        // Snapshot before the placeholder so history ends with the user turn.
        let history = self.log.history(self.history_limit);

        let reply_id = self.log.push(Message::placeholder(self.current_agent.clone()));
        self.events.publish(SessionEvent::MessageAppended {
            id: reply_id.clone(),
            role: Role::Assistant,
        });

        let request = ReplyRequest {
            message_text: content,
            agent_id: self.current_agent.clone(),
            context_id: self.current_context.clone(),
            session_id: self.session_id.clone(),
            history,
        };
        debug!(
            message_id = %reply_id,
            agent = %request.agent_id,
            history = request.history.len(),
            "submitting message"
        );

        let token = CancellationToken::new();
        let stream = transport.stream_reply(request);
        self.streams
            .push(tag_stream(reply_id.clone(), stream, token.clone()));
        self.in_flight.insert(reply_id.clone(), token);

        Ok(reply_id)
    }

    /// Wait for the next event from any in-flight reply and apply it.
    ///
    /// Returns `None` once no reply streams remain. Events from different
    /// replies may arrive in any relative order; events of one reply arrive
    /// in the order the transport produced them.
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        let (id, event) = self.streams.next().await?;

        let applied = match event {
            Some(event) => {
                if event.is_terminal() {
                    self.in_flight.remove(&id);
                }
                self.apply(&id, event)
            }
            None => {
                // Stream ended early, or was cancelled.
                self.in_flight.remove(&id);
                self.apply(&id, ReplyEvent::Error(TransportError::Interrupted))
            }
        };

        Some(SessionUpdate {
            message_id: id,
            applied,
        })
    }

    /// Apply one reply event to the message with `id`.
    ///
    /// Unknown ids (cleared messages) and finished replies are left alone
    /// and reported as [`Applied::Stale`].
    pub fn apply(&mut self, id: &MessageId, event: ReplyEvent) -> Applied {
        match event {
            ReplyEvent::Fragment(text) => self.apply_fragment(id, text),
            ReplyEvent::Complete {
                full_text,
                session_id,
            } => self.apply_complete(id, &full_text, session_id),
            ReplyEvent::Error(err) => self.apply_error(id, err),
        }
    }

    fn apply_fragment(&mut self, id: &MessageId, text: String) -> Applied {
        let Some(message) = self.log.get_mut(id) else {
            trace!(message_id = %id, "fragment for cleared message");
            return Applied::Stale;
        };
        if !message.push_fragment(&text) {
            return Applied::Stale;
        }

        self.events
            .publish(SessionEvent::ReplyUpdated { id: id.clone() });
        self.set_loading(false);
        Applied::Fragment(text)
    }

    fn apply_complete(
        &mut self,
        id: &MessageId,
        full_text: &str,
        session_id: Option<SessionId>,
    ) -> Applied {
        let Some(message) = self.log.get_mut(id) else {
            trace!(message_id = %id, "completion for cleared message");
            return Applied::Stale;
        };
        if !message.complete(full_text) {
            return Applied::Stale;
        }

        if self.session_id.is_none() {
            if let Some(sid) = session_id {
                debug!(session_id = %sid, "adopted backend session");
                self.session_id = Some(sid);
            }
        }

        self.events.publish(SessionEvent::ReplyFinished {
            id: id.clone(),
            ok: true,
        });
        self.set_loading(false);
        Applied::Completed
    }

    fn apply_error(&mut self, id: &MessageId, err: TransportError) -> Applied {
        let Some(message) = self.log.get_mut(id) else {
            trace!(message_id = %id, "error for cleared message");
            return Applied::Stale;
        };
        if !message.fail() {
            return Applied::Stale;
        }

        debug!(message_id = %id, error = %err, "reply failed");
        self.last_error = Some(err.clone());
        self.events.publish(SessionEvent::ReplyFinished {
            id: id.clone(),
            ok: false,
        });
        self.set_loading(false);
        Applied::Failed(err)
    }
}

/// Tag every event of `stream` with `id`, stop after the terminal event,
/// and end early once `cancel` fires.
fn tag_stream(id: MessageId, stream: ReplyStream, cancel: CancellationToken) -> TaggedStream {
    let inner = stream.take_until(cancel.cancelled_owned()).boxed();

    stream::unfold(Some(inner), move |state| {
        let id = id.clone();
        async move {
            let Some(mut inner) = state else {
                return None;
            };
            match inner.next().await {
                Some(event) => {
                    let rest = if event.is_terminal() { None } else { Some(inner) };
                    Some(((id, Some(event)), rest))
                }
                None => Some(((id, None), None)),
            }
        }
    })
    .boxed()
}
