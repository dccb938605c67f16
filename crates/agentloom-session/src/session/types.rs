//! Session-facing result and hook types.

use futures_util::stream::BoxStream;

use crate::{MessageId, ReplyEvent, TransportError};

/// Admission hook consulted before anything is sent, e.g. a credit check.
/// Returning `Err(reason)` rejects the submission without side effects.
pub type SubmitGate = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// What folding one reply event into the log did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Text appended to the target message.
    Fragment(String),
    Completed,
    Failed(TransportError),
    /// Target was cleared away or already finished; nothing changed.
    Stale,
}

/// One event taken off an in-flight reply stream and applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUpdate {
    pub message_id: MessageId,
    pub applied: Applied,
}

/// A reply stream tagged with the placeholder it fills. `None` marks a
/// stream that ended without a terminal event.
pub(super) type TaggedStream = BoxStream<'static, (MessageId, Option<ReplyEvent>)>;
