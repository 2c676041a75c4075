//! Error types for the network.

use agent_model::Capability;
use thiserror::Error;

/// Errors raised by hub, relation graph, and pipeline operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("an agent named '{name}' is already registered")]
    DuplicateAgent { name: String },

    #[error("no registered agent named '{name}'")]
    ReceiverNotFound { name: String },

    #[error("receiver '{receiver}' failed: {reason}")]
    ReceiverInvocation { receiver: String, reason: String },

    #[error("cannot relate '{name}' to itself")]
    SelfRelation { name: String },

    #[error("no component named '{name}' in the pipeline")]
    ComponentNotFound { name: String },

    #[error("component '{name}' does not support {capability}")]
    MissingCapability { name: String, capability: Capability },
}

pub type Result<T> = std::result::Result<T, NetworkError>;
