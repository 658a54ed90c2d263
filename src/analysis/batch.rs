//! Replicate runs over many seeds.
//!
//! Every replicate owns its own engine and random source, so replicates are
//! independent and run in parallel; each engine itself stays
//! single-threaded.

use log::info;
use rayon::prelude::*;

use super::report::peak_summary;
use super::types::{BatchOutcome, BatchSummary, Spread};
use crate::agent::Track;
use crate::config::{SimulationConfig, ValidationError};
use crate::model::DiffusionEngine;

/// Runs one engine to completion.
///
/// Steps at most `max_steps` times; with `stop_when_idle` the loop also
/// stops at the first step boundary where the engine is no longer running.
pub fn run_replicate(
    config: &SimulationConfig,
    seed: u64,
    max_steps: u64,
    stop_when_idle: bool,
) -> Result<BatchOutcome, ValidationError> {
    let config = SimulationConfig { seed: Some(seed), ..config.clone() };
    let mut engine = DiffusionEngine::new(config)?;

    for _ in 0..max_steps {
        if stop_when_idle && !engine.running() {
            break;
        }
        engine.step();
    }

    Ok(BatchOutcome {
        seed,
        steps: engine.step_counter(),
        running: engine.running(),
        peak_a: peak_summary(&engine, Track::A),
        peak_b: peak_summary(&engine, Track::B),
        percentage_spread: engine.percentage_spread(),
        percentage_meme_a: engine.percentage_meme_a(),
        percentage_meme_b: engine.percentage_meme_b(),
    })
}

/// Runs one replicate per seed in parallel; outcomes keep the seed order
pub fn run_batch(
    config: &SimulationConfig,
    seeds: &[u64],
    max_steps: u64,
    stop_when_idle: bool,
) -> Result<BatchSummary, ValidationError> {
    config.validate()?;
    info!("Running batch of {} replicates, up to {} steps each", seeds.len(), max_steps);

    let outcomes = seeds
        .par_iter()
        .map(|&seed| run_replicate(config, seed, max_steps, stop_when_idle))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(summarize(outcomes))
}

/// Aggregates replicate outcomes
pub fn summarize(outcomes: Vec<BatchOutcome>) -> BatchSummary {
    let spread = |f: fn(&BatchOutcome) -> f64| {
        let values: Vec<f64> = outcomes.iter().map(f).collect();
        Spread {
            mean: mean(&values),
            median: median(&values),
        }
    };

    let steps = spread(|o| o.steps as f64);
    let peak_interested_a = spread(|o| o.peak_a.peak_interested as f64);
    let peak_interested_b = spread(|o| o.peak_b.peak_interested as f64);
    let percentage_spread = spread(|o| o.percentage_spread);
    let percentage_meme_a = spread(|o| o.percentage_meme_a);
    let percentage_meme_b = spread(|o| o.percentage_meme_b);

    BatchSummary {
        runs: outcomes.len(),
        finished_runs: outcomes.iter().filter(|o| !o.running).count(),
        steps,
        peak_interested_a,
        peak_interested_b,
        percentage_spread,
        percentage_meme_a,
        percentage_meme_b,
        outcomes,
    }
}

/// Calculate mean of a slice
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate median of a slice
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
