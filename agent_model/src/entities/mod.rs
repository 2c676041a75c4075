//! Participants of the network and the capabilities they may expose.

mod capabilities;
mod mailbox;

pub use capabilities::*;
pub use mailbox::*;

/// Error returned by a capability invocation.
pub type CapabilityError = Box<dyn std::error::Error + Send + Sync>;

/// Anything that can be registered with a hub or placed in a pipeline.
///
/// A component is identified by an immutable name and opts into each
/// capability by overriding the matching accessor. The defaults expose none,
/// so a component that only produces messages needs nothing beyond `name`.
pub trait Component: Send + Sync {
    /// Unique, immutable name of the component.
    fn name(&self) -> &str;

    /// The message-receiving capability, if exposed.
    fn as_receiver(&self) -> Option<&dyn Receiver> {
        None
    }

    /// The configuration/version update capability, if exposed.
    fn as_updatable(&self) -> Option<&dyn Updatable> {
        None
    }

    /// The per-tick iteration capability, if exposed.
    fn as_iterate(&self) -> Option<&dyn Iterate> {
        None
    }

    /// Whether this component exposes the given capability.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Receive => self.as_receiver().is_some(),
            Capability::Update => self.as_updatable().is_some(),
            Capability::Iterate => self.as_iterate().is_some(),
        }
    }
}

impl std::fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name())
            .field("receive", &self.supports(Capability::Receive))
            .field("update", &self.supports(Capability::Update))
            .field("iterate", &self.supports(Capability::Iterate))
            .finish()
    }
}
