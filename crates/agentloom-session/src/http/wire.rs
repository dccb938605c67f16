//! Decoding of the agent endpoint's SSE payloads into `ReplyEvent`s.
//!
//! Each SSE `data` field is a JSON object whose `type` (or the SSE `event:`
//! name) says what it carries:
//!
//! | type                          | fields                  | becomes    |
//! |-------------------------------|-------------------------|------------|
//! | `token`, `chunk`, `delta`     | `content` or `text`     | `Fragment` |
//! | `session`                     | `session_id`            | (held)     |
//! | `done`, `complete`            | `content`, `session_id` | `Complete` |
//! | `error`                       | `error` or `message`    | `Error`    |

use tracing::trace;

use crate::streaming::SseEvent;
use crate::{ReplyEvent, SessionId, TransportError};

/// Turns one exchange's SSE events into reply events and guarantees a
/// single terminal event.
#[derive(Debug, Default)]
pub(crate) struct ReplyDecoder {
    received: String,
    session_id: Option<SessionId>,
    finished: bool,
}

impl ReplyDecoder {
    /// Decode one SSE event. Anything after the terminal event is dropped.
    pub(crate) fn decode(&mut self, event: &SseEvent) -> Option<ReplyEvent> {
        if self.finished {
            return None;
        }

        let data = event.data.trim();
        if data.is_empty() || data == "[DONE]" {
            return None;
        }

        let json: serde_json::Value = match serde_json::from_str(data) {
            Ok(json) => json,
            Err(e) => {
                self.finished = true;
                return Some(ReplyEvent::Error(TransportError::Parse(format!(
                    "invalid event payload: {e}"
                ))));
            }
        };

        let kind = json["type"]
            .as_str()
            .or(event.event.as_deref())
            .unwrap_or("");

        if let Some(sid) = json["session_id"].as_str().filter(|s| !s.is_empty()) {
            self.session_id = Some(SessionId::from(sid));
        }

        match kind {
            "token" | "chunk" | "delta" => {
                let text = text_field(&json);
                if text.is_empty() {
                    return None;
                }
                self.received.push_str(text);
                Some(ReplyEvent::Fragment(text.to_string()))
            }
            "done" | "complete" => {
                self.finished = true;
                Some(ReplyEvent::Complete {
                    full_text: text_field(&json).to_string(),
                    session_id: self.session_id.clone(),
                })
            }
            "error" => {
                self.finished = true;
                let message = json["error"]
                    .as_str()
                    .or(json["message"].as_str())
                    .unwrap_or("unknown error");
                Some(ReplyEvent::Error(TransportError::Api(message.to_string())))
            }
            "session" => None,
            other => {
                trace!(kind = other, "ignoring unknown reply event");
                None
            }
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    /// Terminal event for a body that ended without one.
    pub(crate) fn finish_unterminated(&mut self) -> Option<ReplyEvent> {
        if self.finished {
            return None;
        }
        self.finished = true;
        let err = if self.received.is_empty() {
            TransportError::EmptyReply
        } else {
            TransportError::Interrupted
        };
        Some(ReplyEvent::Error(err))
    }

    /// Terminal event for a failed exchange, unless one was already emitted.
    pub(crate) fn fail(&mut self, err: TransportError) -> Option<ReplyEvent> {
        if self.finished {
            return None;
        }
        self.finished = true;
        Some(ReplyEvent::Error(err))
    }
}

fn text_field(json: &serde_json::Value) -> &str {
    json["content"]
        .as_str()
        .or(json["text"].as_str())
        .unwrap_or("")
}
