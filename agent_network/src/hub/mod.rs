//! Network Hub - the agent registry and everything it owns.
//!
//! The hub performs every delivery inline on the caller's stack:
//! 1. **Record**: Build the message and append it to the history
//! 2. **Relate**: Strengthen the sender's relation with each recipient
//! 3. **Deliver**: Invoke each recipient's `receive` capability in registration order
//!
//! A call returns only after every recipient has been invoked or has failed.

mod analysis;
mod shared;

pub use analysis::*;
pub use shared::*;

use agent_model::{Component, Message, MessageKind, NetworkConfig, Payload};
use serde_json::json;
use std::sync::Arc;

use crate::delivery::{invoke, DeliveryReport, DeliveryStatus};
use crate::error::{NetworkError, Result};
use crate::history::MessageLog;
use crate::knowledge::SharedKnowledgeStore;
use crate::relations::{Relation, RelationGraph};

/// The network hub.
///
/// Agents are held by shared reference; the hub never owns their state and only
/// reaches them through their capabilities.
#[derive(Debug)]
pub struct NetworkHub {
    config: NetworkConfig,
    peers: Vec<Arc<dyn Component>>,
    relations: RelationGraph,
    history: MessageLog,
    knowledge: SharedKnowledgeStore,
    connected_systems: Vec<String>,
}

impl Default for NetworkHub {
    fn default() -> Self {
        Self::with_config(NetworkConfig::default())
    }
}

impl NetworkHub {
    /// Create a hub with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hub with the given configuration.
    ///
    /// The configuration is used as-is; run [`NetworkConfig::validate`] first
    /// when it comes from an untrusted source.
    pub fn with_config(config: NetworkConfig) -> Self {
        Self {
            history: MessageLog::with_capacity(config.history_capacity),
            config,
            peers: Vec::new(),
            relations: RelationGraph::new(),
            knowledge: SharedKnowledgeStore::new(),
            connected_systems: Vec::new(),
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Register an agent. Names are unique; a second agent with a taken name is rejected.
    pub fn register(&mut self, agent: Arc<dyn Component>) -> Result<()> {
        let name = agent.name();
        if self.peers.iter().any(|peer| peer.name() == name) {
            tracing::warn!(agent = %name, "rejected duplicate agent registration");
            return Err(NetworkError::DuplicateAgent {
                name: name.to_string(),
            });
        }

        tracing::debug!(agent = %name, peers = self.peers.len() + 1, "agent registered");
        self.peers.push(agent);
        Ok(())
    }

    /// Remove every agent with the given name. Returns whether anything was removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.peers.len();
        self.peers.retain(|peer| peer.name() != name);
        let removed = self.peers.len() != before;
        if removed {
            tracing::debug!(agent = %name, "agent unregistered");
        }
        removed
    }

    /// Find a registered agent by name.
    pub fn find_agent(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.peers.iter().find(|peer| peer.name() == name).cloned()
    }

    /// Names of registered agents, in registration order.
    pub fn peer_names(&self) -> Vec<&str> {
        self.peers.iter().map(|peer| peer.name()).collect()
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Broadcast a plain message from `sender` to every other peer.
    pub fn broadcast(&mut self, sender: &str, payload: Payload) -> DeliveryReport {
        self.broadcast_kind(sender, payload, MessageKind::Broadcast)
    }

    /// Broadcast tagged as an evolution message.
    pub fn broadcast_evolution(&mut self, sender: &str, payload: Payload) -> DeliveryReport {
        self.broadcast_kind(sender, payload, MessageKind::Evolution)
    }

    /// Broadcast tagged as a consciousness message.
    pub fn broadcast_consciousness(&mut self, sender: &str, payload: Payload) -> DeliveryReport {
        self.broadcast_kind(sender, payload, MessageKind::Consciousness)
    }

    /// Broadcast with an explicit kind. A `Direct` kind is recorded as `Broadcast`.
    pub fn broadcast_kind(
        &mut self,
        sender: &str,
        payload: Payload,
        kind: MessageKind,
    ) -> DeliveryReport {
        let message = Message::broadcast(sender, payload, kind);
        self.history.append(message.clone());

        let mut report = DeliveryReport::new(message.clone());
        for peer in &self.peers {
            let name = peer.name();
            if name == sender {
                continue;
            }

            if let Err(error) =
                self.relations
                    .strengthen(sender, name, self.config.broadcast_increment)
            {
                tracing::debug!(%error, "relation not strengthened");
            }

            let status = match peer.as_receiver() {
                Some(receiver) => invoke(name, || receiver.receive(&message)),
                None => DeliveryStatus::Unsupported,
            };
            report.record(name, status);
        }

        tracing::debug!(
            %sender,
            kind = %message.kind,
            delivered = report.delivered_count(),
            failed = report.failures().len(),
            "broadcast delivered"
        );
        report
    }

    /// Send a message to exactly one named peer.
    ///
    /// An absent receiver yields [`NetworkError::ReceiverNotFound`] and leaves
    /// history and relations untouched.
    pub fn send_direct(
        &mut self,
        sender: &str,
        receiver_name: &str,
        payload: Payload,
    ) -> Result<DeliveryReport> {
        let Some(receiver) = self.find_agent(receiver_name) else {
            tracing::debug!(%sender, receiver = %receiver_name, "direct message to absent receiver");
            return Err(NetworkError::ReceiverNotFound {
                name: receiver_name.to_string(),
            });
        };

        let message = Message::direct(sender, receiver_name, payload);
        self.history.append(message.clone());

        // Self-addressed messages are delivered but carry no relation.
        if sender != receiver_name {
            self.relations
                .strengthen(sender, receiver_name, self.config.direct_increment)?;
        }

        let status = match receiver.as_receiver() {
            Some(capability) => invoke(receiver_name, || capability.receive(&message)),
            None => DeliveryStatus::Unsupported,
        };

        let mut report = DeliveryReport::new(message);
        report.record(receiver_name, status);
        Ok(report)
    }

    /// Record an external system's snapshot and announce it to every peer.
    ///
    /// The announcement is a broadcast sent under the system's name with payload
    /// `{"type": "system_connected", "system": ..., "data": ...}`.
    pub fn connect_external_system(&mut self, system_name: &str, data: Payload) -> DeliveryReport {
        if !self.connected_systems.iter().any(|s| s == system_name) {
            self.connected_systems.push(system_name.to_string());
        }
        self.knowledge.update(system_name, data.clone());
        tracing::info!(system = %system_name, "external system connected");

        let notice = json!({
            "type": "system_connected",
            "system": system_name,
            "data": data,
        });
        self.broadcast(system_name, notice)
    }

    /// Write a snapshot into the shared knowledge store.
    pub fn update_knowledge(&mut self, source: &str, data: Payload) {
        self.knowledge.update(source, data);
    }

    /// External systems that have connected, in first-connection order.
    pub fn connected_systems(&self) -> &[String] {
        &self.connected_systems
    }

    /// Relation between two agents (zero weight if they never interacted).
    pub fn get_relation(&self, a: &str, b: &str) -> Relation {
        self.relations.get_relation(a, b)
    }

    pub fn relations(&self) -> &RelationGraph {
        &self.relations
    }

    pub fn history(&self) -> &MessageLog {
        &self.history
    }

    pub fn knowledge(&self) -> &SharedKnowledgeStore {
        &self.knowledge
    }

    /// Empty the message history. Relations and shared knowledge are kept.
    pub fn clear_history(&mut self) {
        let dropped = self.history.len();
        self.history.clear();
        tracing::info!(dropped, "message history cleared");
    }

    /// Summarize the current state of the network.
    pub fn get_network_analysis(&self) -> NetworkStats {
        NetworkStats::collect(self)
    }
}
