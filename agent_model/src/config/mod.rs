//! Network configuration - tunable weights, capacities, and names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse network config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{field} must not be zero")]
    Zero { field: &'static str },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// Configuration shared by a hub and the pipelines built around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Maximum number of messages kept in the hub's history.
    pub history_capacity: usize,

    /// Relation strengthening applied between sender and each peer on broadcast.
    pub broadcast_increment: f64,

    /// Relation strengthening applied between sender and receiver on direct send.
    pub direct_increment: f64,

    /// Number of relations reported as strongest by the network analysis.
    pub strongest_relations_limit: usize,

    /// Message count at which the activity term of network health saturates.
    pub health_message_saturation: usize,

    /// Sender name stamped on messages transmitted by a pipeline.
    pub pipeline_sender: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            history_capacity: 1000,
            broadcast_increment: 0.05,
            direct_increment: 0.1,
            strongest_relations_limit: 5,
            health_message_saturation: 100,
            pipeline_sender: "pipeline".to_string(),
        }
    }
}

impl NetworkConfig {
    /// Parse and validate a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: NetworkConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("broadcast_increment", self.broadcast_increment),
            ("direct_increment", self.direct_increment),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        for (field, value) in [
            ("history_capacity", self.history_capacity),
            ("strongest_relations_limit", self.strongest_relations_limit),
            ("health_message_saturation", self.health_message_saturation),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { field });
            }
        }

        if self.pipeline_sender.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "pipeline_sender",
            });
        }

        Ok(())
    }
}
