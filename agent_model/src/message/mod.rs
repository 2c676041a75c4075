//! Messages exchanged between agents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Arbitrary data carried by a message or an update.
pub type Payload = serde_json::Value;

/// Receiver name stamped on every broadcast message.
pub const BROADCAST_RECEIVER: &str = "*all*";

/// Unique identifier for messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    /// Create a new random message ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinds of messages.
///
/// `Evolution` and `Consciousness` are broadcast subtypes kept apart only for
/// filtering and analytics; they are delivered exactly like `Broadcast`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Broadcast,
    Direct,
    Evolution,
    Consciousness,
}

impl MessageKind {
    /// Whether messages of this kind fan out to every peer.
    pub fn is_broadcast(&self) -> bool {
        !matches!(self, MessageKind::Direct)
    }

    /// Stable lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Broadcast => "broadcast",
            MessageKind::Direct => "direct",
            MessageKind::Evolution => "evolution",
            MessageKind::Consciousness => "consciousness",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message delivered through the network. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: String,
    /// Receiver name, or [`BROADCAST_RECEIVER`] for fan-out kinds.
    pub receiver: String,
    pub payload: Payload,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
}

impl Message {
    /// Create a broadcast-family message addressed to every peer.
    pub fn broadcast(sender: impl Into<String>, payload: Payload, kind: MessageKind) -> Self {
        let kind = if kind.is_broadcast() {
            kind
        } else {
            MessageKind::Broadcast
        };
        Self {
            id: MessageId::new(),
            sender: sender.into(),
            receiver: BROADCAST_RECEIVER.to_string(),
            payload,
            timestamp: Utc::now(),
            kind,
        }
    }

    /// Create a direct message to a single named receiver.
    pub fn direct(sender: impl Into<String>, receiver: impl Into<String>, payload: Payload) -> Self {
        Self {
            id: MessageId::new(),
            sender: sender.into(),
            receiver: receiver.into(),
            payload,
            timestamp: Utc::now(),
            kind: MessageKind::Direct,
        }
    }

    /// Whether this message was addressed to every peer.
    pub fn is_broadcast(&self) -> bool {
        self.receiver == BROADCAST_RECEIVER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_broadcast_message() {
        let message = Message::broadcast("alice", json!({"x": 1}), MessageKind::Broadcast);
        assert_eq!(message.sender, "alice");
        assert_eq!(message.receiver, BROADCAST_RECEIVER);
        assert_eq!(message.kind, MessageKind::Broadcast);
        assert!(message.is_broadcast());
    }

    #[test]
    fn test_broadcast_rejects_direct_kind() {
        let message = Message::broadcast("alice", json!(null), MessageKind::Direct);
        assert_eq!(message.kind, MessageKind::Broadcast);
    }

    #[test]
    fn test_direct_message() {
        let message = Message::direct("alice", "bob", json!({"x": 2}));
        assert_eq!(message.receiver, "bob");
        assert_eq!(message.kind, MessageKind::Direct);
        assert!(!message.is_broadcast());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::direct("a", "b", json!(null));
        let b = Message::direct("a", "b", json!(null));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_kind_serialization() {
        let encoded = serde_json::to_string(&MessageKind::Consciousness).unwrap();
        assert_eq!(encoded, "\"consciousness\"");
        assert_eq!(MessageKind::Evolution.to_string(), "evolution");
        assert!(MessageKind::Evolution.is_broadcast());
        assert!(!MessageKind::Direct.is_broadcast());
    }
}
