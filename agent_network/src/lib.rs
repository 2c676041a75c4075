//! # Agent Network
//!
//! An in-process broadcast network for named agents. Agents exchange messages
//! through a hub, accumulate pairwise affinity from those exchanges, and share
//! snapshots contributed by external systems.
//!
//! ## Core Components
//!
//! - **hub**: Agent registry, broadcast and direct delivery, network analysis
//! - **relations**: Undirected affinity graph with clamped, non-decreasing weights
//! - **history**: Bounded FIFO log of delivered messages
//! - **knowledge**: Last-write-wins store of external system snapshots
//! - **pipeline**: Fan-out of payloads to any component exposing `receive` or `update`
//! - **delivery**: Per-recipient outcomes for fan-out calls
//!
//! ## Design Philosophy
//!
//! - **Synchronous**: Every delivery completes on the caller's stack, in registration order
//! - **Best Effort**: A failing recipient is recorded, never allowed to stop the others
//! - **Capability-Driven**: Components opt into `receive`, `update`, and `iterate` individually

pub mod delivery;
pub mod error;
pub mod history;
pub mod hub;
pub mod knowledge;
pub mod pipeline;
pub mod relations;

#[cfg(test)]
mod test_support;

pub use delivery::*;
pub use error::NetworkError;
pub use history::*;
pub use hub::*;
pub use knowledge::*;
pub use pipeline::*;
pub use relations::*;
