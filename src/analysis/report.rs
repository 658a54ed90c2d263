//! Report generation for diffusion runs.
//!
//! Generates both JSON and human-readable text reports. Reports are
//! returned as strings; writing them anywhere is up to the caller.

use chrono::Utc;
use color_eyre::eyre::{Context, Result};

use super::types::*;
use crate::agent::Track;
use crate::model::DiffusionEngine;
use crate::topology::Graph;

/// Collect a report from the current state of `engine`
pub fn build_run_report(engine: &DiffusionEngine) -> RunReport {
    let graph = engine.graph();
    let ratio = engine.bored_susceptible_ratio();

    RunReport {
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            seed: engine.seed(),
            total_nodes: graph.num_vertices(),
            total_edges: graph.num_edges(),
            steps: engine.step_counter(),
            degree_stats: degree_stats(graph),
        },
        config: engine.config().clone(),
        running: engine.running(),
        final_metrics: engine.latest(),
        peak_a: peak_summary(engine, Track::A),
        peak_b: peak_summary(engine, Track::B),
        bored_susceptible_ratio: ratio.is_finite().then_some(ratio),
        history: engine.history().clone(),
    }
}

pub(crate) fn peak_summary(engine: &DiffusionEngine, track: Track) -> PeakSummary {
    PeakSummary {
        peak_interested: engine.peak_interested(track),
        step_of_peak: engine.step_of_peak(track),
    }
}

/// Calculate statistical summary of vertex degrees
pub fn degree_stats(graph: &Graph) -> DegreeStats {
    let mut sorted: Vec<usize> = graph.vertices().map(|v| graph.degree(v)).collect();
    sorted.sort_unstable();

    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return DegreeStats {
            min: 0,
            max: 0,
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
        };
    };

    let mean = sorted.iter().sum::<usize>() as f64 / sorted.len() as f64;

    let median = if sorted.len() % 2 == 0 {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) as f64 / 2.0
    } else {
        sorted[sorted.len() / 2] as f64
    };

    let variance: f64 = sorted
        .iter()
        .map(|&v| {
            let diff = v as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / sorted.len() as f64;

    DegreeStats {
        min,
        max,
        mean,
        median,
        std_dev: variance.sqrt(),
    }
}

/// Generate JSON report
pub fn generate_json_report(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

/// Generate human-readable text report
pub fn generate_text_report(report: &RunReport) -> String {
    let mut lines: Vec<String> = Vec::new();
    let m = &report.final_metrics;

    lines.push("=".repeat(80));
    lines.push("                        MEME DIFFUSION RUN SUMMARY".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    lines.push(format!("Generated: {}", report.metadata.generated_at.to_rfc3339()));
    lines.push(format!("Seed: {}", report.metadata.seed));
    lines.push(format!(
        "Graph: {} nodes, {} edges, {} groups (p_in {}, p_out {})",
        report.metadata.total_nodes,
        report.metadata.total_edges,
        report.config.n_groups,
        report.config.p_in,
        report.config.p_out
    ));
    let d = &report.metadata.degree_stats;
    lines.push(format!(
        "Degree: min {}, max {}, mean {:.2}, median {:.1}, std dev {:.2}",
        d.min, d.max, d.mean, d.median, d.std_dev
    ));
    lines.push(format!(
        "Steps: {} ({})",
        report.metadata.steps,
        if report.running { "still spreading" } else { "no node spreading" }
    ));
    lines.push(String::new());

    lines.push("Final State:".to_string());
    lines.push(format!("  Susceptible:       {}", m.susceptible));
    lines.push(format!(
        "  Interested:        A {}, B {}, both {}",
        m.interested_a, m.interested_b, m.interested_both
    ));
    lines.push(format!(
        "  Bored:             A {}, B {}, both {}",
        m.bored_a, m.bored_b, m.bored_both
    ));
    lines.push(format!(
        "  Reached:           {} ({:.1}%)",
        m.touched,
        m.percentage_spread * 100.0
    ));
    lines.push(format!(
        "  Share of reached:  A {:.1}%, B {:.1}%",
        m.percentage_meme_a * 100.0,
        m.percentage_meme_b * 100.0
    ));
    lines.push(format!(
        "  Bored/Susceptible: {}",
        match report.bored_susceptible_ratio {
            Some(ratio) => format!("{:.2}", ratio),
            None => "inf".to_string(),
        }
    ));
    lines.push(String::new());

    lines.push("Peaks:".to_string());
    lines.push(format!(
        "  Meme A: {} interested at step {}",
        report.peak_a.peak_interested, report.peak_a.step_of_peak
    ));
    lines.push(format!(
        "  Meme B: {} interested at step {}",
        report.peak_b.peak_interested, report.peak_b.step_of_peak
    ));
    lines.push(String::new());

    lines.push("Time Series:".to_string());
    lines.push("   step  susceptible  interested_a  interested_b  bored_a  bored_b".to_string());
    let every = (report.history.len() / 20).max(1);
    let last = report.history.len().saturating_sub(1);
    for (i, s) in report.history.iter().enumerate() {
        if i % every == 0 || i == last {
            lines.push(format!(
                "  {:>5}  {:>11}  {:>12}  {:>12}  {:>7}  {:>7}",
                s.step, s.susceptible, s.interested_a, s.interested_b, s.bored_a, s.bored_b
            ));
        }
    }
    lines.push("=".repeat(80));

    lines.join("\n")
}

/// Generate human-readable text for a batch summary
pub fn generate_batch_text_report(summary: &BatchSummary) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(80));
    lines.push("                        MEME DIFFUSION BATCH SUMMARY".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    lines.push(format!(
        "Runs: {} ({} stopped spreading)",
        summary.runs, summary.finished_runs
    ));
    let row = |label: &str, s: &Spread, scale: f64| {
        format!(
            "  {:<20} mean {:>8.2}  median {:>8.2}",
            label,
            s.mean * scale,
            s.median * scale
        )
    };
    lines.push(row("Steps", &summary.steps, 1.0));
    lines.push(row("Peak interested A", &summary.peak_interested_a, 1.0));
    lines.push(row("Peak interested B", &summary.peak_interested_b, 1.0));
    lines.push(row("Reached (%)", &summary.percentage_spread, 100.0));
    lines.push(row("Share A (%)", &summary.percentage_meme_a, 100.0));
    lines.push(row("Share B (%)", &summary.percentage_meme_b, 100.0));
    lines.push(String::new());

    lines.push("Per seed:".to_string());
    for o in &summary.outcomes {
        lines.push(format!(
            "  seed {:>20}: {:>4} steps, peak A {:>4} @ {:>3}, peak B {:>4} @ {:>3}, reached {:.1}%",
            o.seed,
            o.steps,
            o.peak_a.peak_interested,
            o.peak_a.step_of_peak,
            o.peak_b.peak_interested,
            o.peak_b.step_of_peak,
            o.percentage_spread * 100.0
        ));
    }
    lines.push("=".repeat(80));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    fn engine() -> DiffusionEngine {
        let config = SimulationConfig { num_nodes: 30, seed: Some(8), ..Default::default() };
        let mut engine = DiffusionEngine::new(config).unwrap();
        engine.run(5);
        engine
    }

    #[test]
    fn test_degree_stats() {
        let graph = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3)]);
        let stats = degree_stats(&graph);
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 3);
        assert!((stats.mean - 1.5).abs() < 1e-12);
        assert!((stats.median - 1.0).abs() < 1e-12);

        let empty = degree_stats(&Graph::empty(0));
        assert_eq!(empty.max, 0);
        assert_eq!(empty.mean, 0.0);
    }

    #[test]
    fn test_run_report_contents() {
        let engine = engine();
        let report = build_run_report(&engine);
        assert_eq!(report.metadata.seed, 8);
        assert_eq!(report.metadata.steps, 5);
        assert_eq!(report.metadata.total_nodes, 30);
        assert_eq!(report.history.len(), 6);
        assert_eq!(report.final_metrics, engine.latest());
        assert_eq!(report.peak_a.peak_interested, engine.peak_interested_a());
    }

    #[test]
    fn test_json_report() {
        let report = build_run_report(&engine());
        let json = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["seed"], 8);
        assert_eq!(value["history"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["config"]["initial_viral_size_A"], 5);
    }

    #[test]
    fn test_text_report() {
        let text = generate_text_report(&build_run_report(&engine()));
        assert!(text.contains("MEME DIFFUSION RUN SUMMARY"));
        assert!(text.contains("Seed: 8"));
        assert!(text.contains("Meme A:"));
        assert!(text.contains("Bored/Susceptible:"));
    }
}
