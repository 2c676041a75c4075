//! Message history - a bounded, insertion-ordered log of delivered messages.

use agent_model::{Message, MessageKind};
use std::collections::{BTreeMap, VecDeque};

/// Default number of messages retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// FIFO ring buffer of messages. Appending past capacity evicts the oldest.
#[derive(Debug, Clone)]
pub struct MessageLog {
    capacity: usize,
    messages: VecDeque<Message>,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl MessageLog {
    /// Create a log with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that retains at most `capacity` messages.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            messages: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
        }
    }

    /// Add a message at the tail, evicting from the head while over capacity.
    pub fn append(&mut self, message: Message) {
        self.messages.push_back(message);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    /// Copy of the retained messages, oldest first.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.iter().cloned().collect()
    }

    /// Drop every retained message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate over retained messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Retained messages of one kind.
    pub fn by_kind(&self, kind: MessageKind) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.kind == kind).collect()
    }

    /// Retained messages sent by `sender`.
    pub fn by_sender(&self, sender: &str) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.sender == sender).collect()
    }

    /// The newest `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> Vec<&Message> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip).collect()
    }

    /// Histogram of retained messages by kind.
    pub fn count_by_kind(&self) -> BTreeMap<MessageKind, usize> {
        let mut counts = BTreeMap::new();
        for message in &self.messages {
            *counts.entry(message.kind).or_default() += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbered(n: u32) -> Message {
        Message::broadcast("alice", json!({ "n": n }), MessageKind::Broadcast)
    }

    #[test]
    fn test_default_capacity() {
        let log = MessageLog::new();
        assert_eq!(log.capacity(), 1000);
        assert!(log.is_empty());
    }

    #[test]
    fn test_eviction_keeps_most_recent() {
        let mut log = MessageLog::with_capacity(3);
        let messages: Vec<_> = (1..=5).map(numbered).collect();
        for message in &messages {
            log.append(message.clone());
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.snapshot(), messages[2..].to_vec());
    }

    #[test]
    fn test_bounded_for_any_overflow() {
        for extra in 0..4 {
            let mut log = MessageLog::with_capacity(4);
            for n in 0..(4 + extra) {
                log.append(numbered(n));
            }
            assert_eq!(log.len(), 4);
            assert_eq!(log.iter().next().unwrap().payload, json!({ "n": extra }));
        }
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut log = MessageLog::with_capacity(2);
        log.append(numbered(1));
        let snapshot = log.snapshot();
        log.clear();

        assert_eq!(snapshot.len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn test_filters_and_histogram() {
        let mut log = MessageLog::new();
        log.append(numbered(1));
        log.append(Message::direct("bob", "alice", json!(null)));
        log.append(Message::broadcast("bob", json!(null), MessageKind::Evolution));

        assert_eq!(log.by_kind(MessageKind::Direct).len(), 1);
        assert_eq!(log.by_sender("bob").len(), 2);
        assert_eq!(log.recent(2)[0].kind, MessageKind::Direct);
        assert_eq!(log.recent(10).len(), 3);

        let counts = log.count_by_kind();
        assert_eq!(counts.get(&MessageKind::Broadcast), Some(&1));
        assert_eq!(counts.get(&MessageKind::Direct), Some(&1));
        assert_eq!(counts.get(&MessageKind::Evolution), Some(&1));
        assert_eq!(counts.get(&MessageKind::Consciousness), None);
    }
}
