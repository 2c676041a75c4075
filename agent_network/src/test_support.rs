//! Agents with misbehaving or missing capabilities, for tests.

use agent_model::{CapabilityError, Component, Iterate, Message, Payload, Receiver, Updatable};

/// Exposes every capability and fails each call.
pub struct FailingAgent {
    name: String,
}

impl FailingAgent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Component for FailingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_receiver(&self) -> Option<&dyn Receiver> {
        Some(self)
    }

    fn as_updatable(&self) -> Option<&dyn Updatable> {
        Some(self)
    }

    fn as_iterate(&self) -> Option<&dyn Iterate> {
        Some(self)
    }
}

impl Receiver for FailingAgent {
    fn receive(&self, _message: &Message) -> Result<(), CapabilityError> {
        Err("receiver offline".into())
    }
}

impl Updatable for FailingAgent {
    fn update(&self, _payload: &Payload) -> Result<(), CapabilityError> {
        Err("update rejected".into())
    }
}

impl Iterate for FailingAgent {
    fn step(&self) -> Result<Payload, CapabilityError> {
        Err("stalled".into())
    }
}

/// Panics on receive and on step.
pub struct PanickingAgent {
    name: String,
}

impl PanickingAgent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Component for PanickingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_receiver(&self) -> Option<&dyn Receiver> {
        Some(self)
    }

    fn as_iterate(&self) -> Option<&dyn Iterate> {
        Some(self)
    }
}

impl Receiver for PanickingAgent {
    fn receive(&self, _message: &Message) -> Result<(), CapabilityError> {
        panic!("{} cannot take messages", self.name)
    }
}

impl Iterate for PanickingAgent {
    fn step(&self) -> Result<Payload, CapabilityError> {
        panic!("{} overflowed its tick counter", self.name)
    }
}

/// Exposes no capabilities at all.
pub struct MuteAgent {
    name: String,
}

impl MuteAgent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Component for MuteAgent {
    fn name(&self) -> &str {
        &self.name
    }
}
