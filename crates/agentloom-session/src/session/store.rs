//! Ordered message storage with lookup by id.

use std::collections::HashMap;

use crate::{HistoryEntry, Message, MessageId};

/// Append-only log plus an id index. Positions never shift, so the index
/// stays valid until `clear`.
#[derive(Debug, Default)]
pub(super) struct MessageLog {
    messages: Vec<Message>,
    index: HashMap<MessageId, usize>,
}

impl MessageLog {
    pub(super) fn push(&mut self, message: Message) -> MessageId {
        let id = message.id().clone();
        self.index.insert(id.clone(), self.messages.len());
        self.messages.push(message);
        id
    }

    pub(super) fn get(&self, id: &MessageId) -> Option<&Message> {
        self.index.get(id).map(|&pos| &self.messages[pos])
    }

    pub(super) fn get_mut(&mut self, id: &MessageId) -> Option<&mut Message> {
        let pos = *self.index.get(id)?;
        self.messages.get_mut(pos)
    }

    pub(super) fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub(super) fn clear(&mut self) {
        self.messages.clear();
        self.index.clear();
    }

    /// Role/content pairs of the most recent `limit` entries (all if `None`).
    pub(super) fn history(&self, limit: Option<usize>) -> Vec<HistoryEntry> {
        let skip = limit.map_or(0, |n| self.messages.len().saturating_sub(n));
        self.messages
            .iter()
            .skip(skip)
            .map(Message::to_history)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn lookup_by_id_after_push() {
        let mut log = MessageLog::default();
        let a = log.push(Message::user("a"));
        let b = log.push(Message::placeholder("general"));

        assert_eq!(log.get(&a).map(Message::content), Some("a"));
        assert_eq!(log.get(&b).map(Message::role), Some(Role::Assistant));
        assert_eq!(log.as_slice().len(), 2);
    }

    #[test]
    fn clear_forgets_ids() {
        let mut log = MessageLog::default();
        let a = log.push(Message::user("a"));
        log.clear();
        assert!(log.get(&a).is_none());
        assert!(log.get_mut(&a).is_none());
        assert!(log.as_slice().is_empty());
    }

    #[test]
    fn history_respects_limit() {
        let mut log = MessageLog::default();
        for text in ["one", "two", "three"] {
            log.push(Message::user(text));
        }

        let all = log.history(None);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].content, "one");

        let last_two = log.history(Some(2));
        assert_eq!(
            last_two.iter().map(|h| h.content.as_str()).collect::<Vec<_>>(),
            vec!["two", "three"]
        );

        assert_eq!(log.history(Some(10)).len(), 3);
    }
}
