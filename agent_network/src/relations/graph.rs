//! Relation Graph - undirected weighted graph over agent names.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{NetworkError, Result};

/// Canonical key for an unordered pair of agent names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationKey(String, String);

impl RelationKey {
    /// Build the key for `{a, b}`; argument order does not matter.
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }
}

/// Affinity between two agents. `a` and `b` are stored in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub a: String,
    pub b: String,
    /// Weight from 0.0 to 1.0 indicating interaction strength.
    pub weight: f64,
}

impl Relation {
    fn empty(key: RelationKey) -> Self {
        Self {
            a: key.0,
            b: key.1,
            weight: 0.0,
        }
    }

    /// Check if this relation involves the given agent.
    pub fn involves(&self, name: &str) -> bool {
        self.a == name || self.b == name
    }

    /// The other side of the relation, if `name` is part of it.
    pub fn other(&self, name: &str) -> Option<&str> {
        if self.a == name {
            Some(&self.b)
        } else if self.b == name {
            Some(&self.a)
        } else {
            None
        }
    }
}

/// The relation graph.
///
/// Relations live in an insertion-ordered arena with a pair-key index for O(1)
/// lookup. Insertion order is what breaks ties when ranking by weight.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    relations: Vec<Relation>,
    index: HashMap<RelationKey, usize>,
}

impl RelationGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strengthen the relation between `a` and `b`, creating it on first contact.
    ///
    /// The weight becomes `min(1, weight + amount)`; negative amounts count as
    /// zero. Returns the new weight.
    pub fn strengthen(&mut self, a: &str, b: &str, amount: f64) -> Result<f64> {
        if a == b {
            return Err(NetworkError::SelfRelation {
                name: a.to_string(),
            });
        }

        let key = RelationKey::new(a, b);
        let slot = match self.index.get(&key) {
            Some(slot) => *slot,
            None => {
                let slot = self.relations.len();
                self.relations.push(Relation::empty(key.clone()));
                self.index.insert(key, slot);
                slot
            }
        };

        let relation = &mut self.relations[slot];
        relation.weight = (relation.weight + amount.max(0.0)).min(1.0);
        Ok(relation.weight)
    }

    /// Get the relation between `a` and `b`.
    ///
    /// Pairs that never interacted yield a zero-weight view; use
    /// [`has_relation`](Self::has_relation) to tell the two apart.
    pub fn get_relation(&self, a: &str, b: &str) -> Relation {
        let key = RelationKey::new(a, b);
        match self.index.get(&key) {
            Some(slot) => self.relations[*slot].clone(),
            None => Relation::empty(key),
        }
    }

    /// Check if `a` and `b` have ever interacted.
    pub fn has_relation(&self, a: &str, b: &str) -> bool {
        self.index.contains_key(&RelationKey::new(a, b))
    }

    /// All relations involving `name`, in insertion order.
    pub fn relations_of(&self, name: &str) -> Vec<&Relation> {
        self.relations.iter().filter(|r| r.involves(name)).collect()
    }

    /// Iterate over all relations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }

    /// Get the total number of relations.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Mean weight over all relations, or zero for an empty graph.
    pub fn mean_weight(&self) -> f64 {
        if self.relations.is_empty() {
            return 0.0;
        }
        self.relations.iter().map(|r| r.weight).sum::<f64>() / self.relations.len() as f64
    }

    /// The `limit` heaviest relations, descending; ties keep insertion order.
    pub fn strongest(&self, limit: usize) -> Vec<Relation> {
        let mut ranked: Vec<&Relation> = self.relations.iter().collect();
        ranked.sort_by(|x, y| {
            y.weight
                .partial_cmp(&x.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.into_iter().take(limit).cloned().collect()
    }
}
