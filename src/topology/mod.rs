//! Social graph topology module.
//!
//! This module contains the immutable adjacency structure the population is
//! bound to, and the stochastic block model generator that builds it.

pub mod types;
pub mod partition;

// Re-export key types and functions for easier access
pub use types::Graph;
pub use partition::{generate_partition_graph, partition_sizes};
