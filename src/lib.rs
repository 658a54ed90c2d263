//! # MemeSim - Competitive meme diffusion over social graphs
//!
//! This library simulates two memes (A and B) spreading through a social
//! network with community structure. Nodes become interested in a meme
//! through their neighbors, eventually get bored of it, and a few
//! influencers spread faster than everyone else.
//!
//! ## Overview
//!
//! A run is fully determined by its configuration and seed. The graph, the
//! population, the activation order of every step and every transition draw
//! all come from one seeded random source.
//!
//! ## Architecture
//!
//! - `config`: Typed simulation configuration and validation
//! - `config_loader`: YAML loading and command-line overrides
//! - `topology`: Graph arena and stochastic block model generation
//! - `agent`: State tags, meme tracks, and per-node transitions
//! - `model`: Population arena and the diffusion engine
//! - `analysis`: Metrics, history, renderer snapshots, batches, reports
//!
//! ## Example Usage
//!
//! ```rust
//! use memesim::config::SimulationConfig;
//! use memesim::model::DiffusionEngine;
//!
//! let config = SimulationConfig { seed: Some(42), ..Default::default() };
//! let mut engine = DiffusionEngine::new(config)?;
//!
//! while engine.running() && engine.step_counter() < 200 {
//!     engine.step();
//! }
//!
//! println!(
//!     "reached {:.0}% of the population, meme A peaked at {} on step {}",
//!     engine.percentage_spread() * 100.0,
//!     engine.peak_interested_a(),
//!     engine.step_of_peak_a(),
//! );
//! # Ok::<(), memesim::config::ValidationError>(())
//! ```
//!
//! ## Error Handling
//!
//! Construction returns [`config::ValidationError`] for invalid
//! configurations. File loading and the binary use `color_eyre` for error
//! reporting with context.

pub mod config;
pub mod config_loader;
pub mod topology;
pub mod agent;
pub mod model;
pub mod analysis;
