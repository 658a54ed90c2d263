//! Simulated individuals: state tags, meme tracks, and per-node transitions.

pub mod types;
pub mod node;

pub use types::{State, StateSet, Track};
pub use node::{Node, NodeParams};
