//! Relations module - pairwise affinity between agents.
//!
//! Every unordered pair of agents has at most one relation. Its weight lies in
//! `[0, 1]`, grows with each interaction, and never decreases.

mod graph;

pub use graph::*;
