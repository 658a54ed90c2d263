//! Report data types for diffusion runs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::history::History;
use super::metrics::MetricsSnapshot;
use crate::config::SimulationConfig;

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub total_nodes: usize,
    pub total_edges: usize,
    pub steps: u64,
    pub degree_stats: DegreeStats,
}

/// Statistical summary of degrees
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// Peak interested count of one meme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakSummary {
    pub peak_interested: usize,
    pub step_of_peak: u64,
}

/// Everything a caller needs to present one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub metadata: ReportMetadata,
    pub config: SimulationConfig,
    pub running: bool,
    pub final_metrics: MetricsSnapshot,
    pub peak_a: PeakSummary,
    pub peak_b: PeakSummary,
    /// `None` when infinite (no susceptible node left)
    pub bored_susceptible_ratio: Option<f64>,
    pub history: History,
}

/// Result of one replicate in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub seed: u64,
    pub steps: u64,
    pub running: bool,
    pub peak_a: PeakSummary,
    pub peak_b: PeakSummary,
    pub percentage_spread: f64,
    pub percentage_meme_a: f64,
    pub percentage_meme_b: f64,
}

/// Mean and median of a metric across replicates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spread {
    pub mean: f64,
    pub median: f64,
}

/// Aggregate over all replicates in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub runs: usize,
    pub finished_runs: usize,
    pub steps: Spread,
    pub peak_interested_a: Spread,
    pub peak_interested_b: Spread,
    pub percentage_spread: Spread,
    pub percentage_meme_a: Spread,
    pub percentage_meme_b: Spread,
    pub outcomes: Vec<BatchOutcome>,
}
