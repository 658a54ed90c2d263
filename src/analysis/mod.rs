//! Metrics, time series, and reporting for diffusion runs.
//!
//! This module provides the aggregate metrics computed from the population
//! each step, the recorded history, renderer snapshots, batch replicates,
//! and report generation.

pub mod types;
pub mod metrics;
pub mod history;
pub mod snapshot;
pub mod batch;
pub mod report;

pub use types::*;
pub use metrics::MetricsSnapshot;
pub use history::History;
pub use snapshot::{NetworkSnapshot, NodeView};
pub use batch::{run_batch, run_replicate};
pub use report::{build_run_report, generate_batch_text_report, generate_json_report, generate_text_report};
