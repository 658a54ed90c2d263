//! Population arena and the diffusion engine that drives it.

pub mod population;
pub mod engine;

pub use population::{ActivationOutcome, Population};
pub use engine::DiffusionEngine;
