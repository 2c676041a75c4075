//! Pipeline - fans one payload out to a heterogeneous list of components.
//!
//! Producers hand a payload to the pipeline without knowing who consumes it.
//! Two channels are kept apart so a component can opt into either:
//! - **transmit**: data-flow notifications, delivered through `receive`
//! - **broadcast_update**: configuration/version pushes, delivered through `update`

use agent_model::{Capability, Component, Message, MessageKind, NetworkConfig, Payload};
use std::sync::Arc;

use crate::delivery::{invoke, invoke_with, DeliveryReport, DeliveryStatus};
use crate::error::{NetworkError, Result};

/// An ordered list of components with fan-out helpers.
#[derive(Debug)]
pub struct Pipeline {
    sender: String,
    components: Vec<Arc<dyn Component>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&NetworkConfig::default())
    }
}

impl Pipeline {
    /// Create an empty pipeline whose messages are sent as `config.pipeline_sender`.
    pub fn new(config: &NetworkConfig) -> Self {
        Self {
            sender: config.pipeline_sender.clone(),
            components: Vec::new(),
        }
    }

    /// Append a component.
    pub fn with_component(mut self, component: Arc<dyn Component>) -> Self {
        self.add_component(component);
        self
    }

    /// Append a component. Delivery follows insertion order.
    pub fn add_component(&mut self, component: Arc<dyn Component>) {
        tracing::debug!(component = %component.name(), "component added to pipeline");
        self.components.push(component);
    }

    /// Remove every component with the given name.
    pub fn remove_component(&mut self, name: &str) -> bool {
        let before = self.components.len();
        self.components.retain(|c| c.name() != name);
        self.components.len() != before
    }

    /// Names of components, in delivery order.
    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Deliver `payload` to every component exposing `receive`.
    ///
    /// The payload is wrapped in a broadcast message sent by the pipeline. A
    /// failing component is recorded in the report and does not stop delivery.
    pub fn transmit(&self, payload: Payload) -> DeliveryReport {
        let message = Message::broadcast(&self.sender, payload, MessageKind::Broadcast);
        let mut report = DeliveryReport::new(message.clone());

        for component in &self.components {
            let name = component.name();
            let status = match component.as_receiver() {
                Some(receiver) => invoke(name, || receiver.receive(&message)),
                None => DeliveryStatus::Unsupported,
            };
            report.record(name, status);
        }

        tracing::debug!(
            delivered = report.delivered_count(),
            failed = report.failures().len(),
            "pipeline transmit"
        );
        report
    }

    /// Deliver `payload` to every component exposing `update`.
    pub fn broadcast_update(&self, payload: &Payload) -> DeliveryReport<()> {
        let mut report = DeliveryReport::new(());

        for component in &self.components {
            let name = component.name();
            let status = match component.as_updatable() {
                Some(updatable) => invoke(name, || updatable.update(payload)),
                None => DeliveryStatus::Unsupported,
            };
            report.record(name, status);
        }

        tracing::debug!(
            delivered = report.delivered_count(),
            failed = report.failures().len(),
            "pipeline update"
        );
        report
    }

    /// Run one iteration of the named component and return what it produced.
    pub fn run_iteration(&self, name: &str) -> Result<Payload> {
        let component = self
            .components
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| NetworkError::ComponentNotFound {
                name: name.to_string(),
            })?;

        let iterate = component
            .as_iterate()
            .ok_or_else(|| NetworkError::MissingCapability {
                name: name.to_string(),
                capability: Capability::Iterate,
            })?;

        invoke_with(name, || iterate.step())
    }
}
