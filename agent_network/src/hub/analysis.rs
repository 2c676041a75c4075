//! Network analysis - aggregate statistics over a hub.

use agent_model::MessageKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::NetworkHub;
use crate::relations::Relation;

/// Share of network health taken by the mean relation weight.
const RELATION_SHARE: f64 = 0.7;
/// Share of network health taken by message activity.
const ACTIVITY_SHARE: f64 = 0.3;

/// Snapshot of a hub's registry, history, and relation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub active_agents: usize,
    /// Messages currently retained in history.
    pub total_messages: usize,
    pub total_relations: usize,
    /// Heaviest relations, descending; ties keep insertion order.
    pub strongest_relations: Vec<Relation>,
    pub messages_by_kind: BTreeMap<MessageKind, usize>,
    /// `0.7 * mean relation weight + 0.3 * min(1, messages / saturation)`.
    pub network_health: f64,
}

impl NetworkStats {
    pub(crate) fn collect(hub: &NetworkHub) -> Self {
        let config = hub.config();
        let relations = hub.relations();
        let total_messages = hub.history().len();

        Self {
            active_agents: hub.peer_count(),
            total_messages,
            total_relations: relations.len(),
            strongest_relations: relations.strongest(config.strongest_relations_limit),
            messages_by_kind: hub.history().count_by_kind(),
            network_health: network_health(
                relations.mean_weight(),
                total_messages,
                config.health_message_saturation,
            ),
        }
    }
}

/// Composite health score in `[0, 1]`.
pub fn network_health(mean_weight: f64, total_messages: usize, saturation: usize) -> f64 {
    let activity = if saturation == 0 {
        1.0
    } else {
        (total_messages as f64 / saturation as f64).min(1.0)
    };
    RELATION_SHARE * mean_weight + ACTIVITY_SHARE * activity
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_model::MailboxAgent;
    use serde_json::json;
    use std::sync::Arc;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_hub() {
        let stats = NetworkHub::new().get_network_analysis();
        assert_eq!(stats.active_agents, 0);
        assert_eq!(stats.total_messages, 0);
        assert_eq!(stats.total_relations, 0);
        assert!(stats.strongest_relations.is_empty());
        assert!(stats.messages_by_kind.is_empty());
        assert_eq!(stats.network_health, 0.0);
    }

    #[test]
    fn test_health_formula() {
        assert!(approx(network_health(0.5, 50, 100), 0.35 + 0.15));
        assert!(approx(network_health(1.0, 500, 100), 1.0));
        assert!(approx(network_health(0.0, 0, 100), 0.0));
    }

    #[test]
    fn test_analysis_after_traffic() {
        let mut hub = NetworkHub::new();
        for name in ["alice", "bob", "carol"] {
            hub.register(Arc::new(MailboxAgent::new(name))).unwrap();
        }

        hub.broadcast("alice", json!(null));
        hub.send_direct("bob", "carol", json!(null)).unwrap();
        hub.broadcast_evolution("carol", json!(null));

        let stats = hub.get_network_analysis();
        assert_eq!(stats.active_agents, 3);
        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.total_relations, 3);
        assert_eq!(stats.messages_by_kind.get(&MessageKind::Broadcast), Some(&1));
        assert_eq!(stats.messages_by_kind.get(&MessageKind::Direct), Some(&1));
        assert_eq!(stats.messages_by_kind.get(&MessageKind::Evolution), Some(&1));

        // alice-bob 0.05, alice-carol 0.10, bob-carol 0.15
        let top = &stats.strongest_relations[0];
        assert_eq!((top.a.as_str(), top.b.as_str()), ("bob", "carol"));
        assert!(approx(top.weight, 0.15));

        let mean = (0.05 + 0.10 + 0.15) / 3.0;
        assert!(approx(stats.network_health, 0.7 * mean + 0.3 * 0.03));
    }

    #[test]
    fn test_strongest_is_limited() {
        let mut hub = NetworkHub::new();
        for n in 0..8 {
            hub.register(Arc::new(MailboxAgent::new(format!("agent-{n}"))))
                .unwrap();
        }
        hub.broadcast("agent-0", json!(null));
        hub.broadcast("agent-1", json!(null));

        let stats = hub.get_network_analysis();
        assert_eq!(stats.total_relations, 13);
        assert_eq!(stats.strongest_relations.len(), 5);

        // agent-0/agent-1 was strengthened twice and ranks first.
        let top = &stats.strongest_relations[0];
        assert_eq!((top.a.as_str(), top.b.as_str()), ("agent-0", "agent-1"));
        assert!(approx(top.weight, 0.1));
        // The rest tie at 0.05 and keep insertion order.
        assert_eq!(stats.strongest_relations[1].b, "agent-2");
        assert_eq!(stats.strongest_relations[2].b, "agent-3");
    }

    #[test]
    fn test_stats_serialize() {
        let mut hub = NetworkHub::new();
        hub.register(Arc::new(MailboxAgent::new("alice"))).unwrap();
        hub.broadcast_consciousness("alice", json!(null));

        let encoded = serde_json::to_value(hub.get_network_analysis()).unwrap();
        assert_eq!(encoded["messages_by_kind"]["consciousness"], json!(1));
    }
}
