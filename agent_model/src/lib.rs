//! # Agent Model
//!
//! The shared vocabulary of the agent network. This crate defines what travels
//! through the network (messages and payloads), what a participant may be able to
//! do with it (capabilities), and how a network is tuned (configuration). It holds
//! no network state of its own.
//!
//! ## Core Components
//!
//! - **entities**: Capability traits for agents and components, plus a ready-made mailbox agent
//! - **message**: Messages, message kinds, and identifiers
//! - **config**: Tunable network parameters loadable from TOML

pub mod config;
pub mod entities;
pub mod message;

pub use config::*;
pub use entities::*;
pub use message::*;
