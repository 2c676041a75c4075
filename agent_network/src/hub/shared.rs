//! Shared hub handle - a lockable hub that can also sit inside a pipeline.

use agent_model::{CapabilityError, Component, Message, Payload, Receiver, Updatable};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::NetworkHub;

/// Default component name of a shared hub.
pub const DEFAULT_HUB_NAME: &str = "hub";

/// Cloneable handle to a hub behind a single lock.
///
/// Every operation takes the lock for its whole duration, so concurrent
/// producers never interleave a relation update or a history eviction. The
/// lock is not reentrant: a receiver invoked by this hub must not call back
/// into the same handle.
#[derive(Debug, Clone)]
pub struct SharedHub {
    name: String,
    inner: Arc<Mutex<NetworkHub>>,
}

impl SharedHub {
    /// Wrap a hub.
    pub fn new(hub: NetworkHub) -> Self {
        Self {
            name: DEFAULT_HUB_NAME.to_string(),
            inner: Arc::new(Mutex::new(hub)),
        }
    }

    /// Set the name this hub uses as a pipeline component.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Acquire exclusive access to the hub.
    pub fn lock(&self) -> MutexGuard<'_, NetworkHub> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the hub.
    pub fn with<R>(&self, f: impl FnOnce(&mut NetworkHub) -> R) -> R {
        f(&mut self.lock())
    }
}

impl Component for SharedHub {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_receiver(&self) -> Option<&dyn Receiver> {
        Some(self)
    }

    fn as_updatable(&self) -> Option<&dyn Updatable> {
        Some(self)
    }
}

/// Re-dispatches an incoming message to the hub's own peers, keeping its
/// sender and kind. Broadcast-family messages fan out; direct messages go to
/// their named receiver. Fails when any peer failed, naming those peers.
impl Receiver for SharedHub {
    fn receive(&self, message: &Message) -> Result<(), CapabilityError> {
        let mut hub = self.lock();
        let report = if message.is_broadcast() {
            hub.broadcast_kind(&message.sender, message.payload.clone(), message.kind)
        } else {
            hub.send_direct(&message.sender, &message.receiver, message.payload.clone())?
        };

        if report.is_complete() {
            Ok(())
        } else {
            Err(format!("peers failed: {}", report.failed_recipients().join(", ")).into())
        }
    }
}

/// Stores the payload in shared knowledge under the configured pipeline sender.
impl Updatable for SharedHub {
    fn update(&self, payload: &Payload) -> Result<(), CapabilityError> {
        let mut hub = self.lock();
        let source = hub.config().pipeline_sender.clone();
        hub.update_knowledge(&source, payload.clone());
        Ok(())
    }
}
