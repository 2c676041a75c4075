//! Capability definitions for components.

use serde::{Deserialize, Serialize};

use super::CapabilityError;
use crate::message::{Message, Payload};

/// Capabilities a component may opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Data-flow notifications (`receive`).
    Receive,
    /// Configuration/version notifications (`update`).
    Update,
    /// Internal per-tick state advancement (`step`).
    Iterate,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Receive => "receive",
            Capability::Update => "update",
            Capability::Iterate => "iterate",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives messages fanned out by a hub or a pipeline.
pub trait Receiver {
    fn receive(&self, message: &Message) -> Result<(), CapabilityError>;
}

/// Accepts configuration or version-style pushes.
pub trait Updatable {
    fn update(&self, payload: &Payload) -> Result<(), CapabilityError>;
}

/// Advances internal state by one tick outside the broadcast flow.
pub trait Iterate {
    /// Run one iteration and return whatever the component reports for it.
    fn step(&self) -> Result<Payload, CapabilityError>;
}
