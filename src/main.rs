use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use memesim::analysis::{self, NetworkSnapshot};
use memesim::config::SimulationConfig;
use memesim::config_loader::{self, CliOverrides};
use memesim::model::DiffusionEngine;

/// Competitive two-meme diffusion simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Path to the simulation configuration YAML file (defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the number of nodes
    #[arg(long, global = true)]
    num_nodes: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single simulation and print its report
    Run {
        /// Number of steps to run
        #[arg(short, long, default_value = "100")]
        steps: u64,

        /// Seed for the random source
        #[arg(long)]
        seed: Option<u64>,

        /// Stop at the first step where no node is spreading any meme
        #[arg(long)]
        until_idle: bool,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Print the final node states and edge list as JSON
        #[arg(long)]
        snapshot: bool,
    },

    /// Run replicates over consecutive seeds in parallel
    Batch {
        /// Number of replicates
        #[arg(short, long, default_value = "10")]
        runs: u64,

        /// Seed of the first replicate
        #[arg(long, default_value = "0")]
        base_seed: u64,

        /// Maximum number of steps per replicate
        #[arg(short, long, default_value = "100")]
        steps: u64,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();

    let seed = match &args.command {
        Commands::Run { seed, .. } => *seed,
        Commands::Batch { .. } => None,
    };
    let config = load(&args, seed)?;

    match args.command {
        Commands::Run { steps, until_idle, format, snapshot, .. } => {
            run_single(config, steps, until_idle, format, snapshot)
        }
        Commands::Batch { runs, base_seed, steps, format } => {
            run_many(&config, runs, base_seed, steps, format)
        }
    }
}

fn load(args: &Args, seed: Option<u64>) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => {
            info!("No configuration file given, using defaults");
            SimulationConfig::default()
        }
    };
    let overrides = CliOverrides { seed, num_nodes: args.num_nodes };
    config_loader::apply_overrides(&mut config, &overrides)?;
    Ok(config)
}

fn run_single(
    config: SimulationConfig,
    steps: u64,
    until_idle: bool,
    format: OutputFormat,
    snapshot: bool,
) -> Result<()> {
    let mut engine = DiffusionEngine::new(config).wrap_err("Invalid simulation configuration")?;

    for _ in 0..steps {
        if until_idle && !engine.running() {
            break;
        }
        engine.step();
    }
    info!("Finished after {} steps", engine.step_counter());

    let report = analysis::build_run_report(&engine);
    match format {
        OutputFormat::Text => println!("{}", analysis::generate_text_report(&report)),
        OutputFormat::Json => println!("{}", analysis::generate_json_report(&report)?),
    }

    if snapshot {
        let view = NetworkSnapshot::capture(&engine);
        println!(
            "{}",
            serde_json::to_string_pretty(&view).wrap_err("Failed to serialize network snapshot")?
        );
    }

    Ok(())
}

fn run_many(
    config: &SimulationConfig,
    runs: u64,
    base_seed: u64,
    steps: u64,
    format: OutputFormat,
) -> Result<()> {
    let seeds: Vec<u64> = (0..runs).map(|i| base_seed.wrapping_add(i)).collect();
    let summary = analysis::run_batch(config, &seeds, steps, true)
        .wrap_err("Invalid simulation configuration")?;

    match format {
        OutputFormat::Text => println!("{}", analysis::generate_batch_text_report(&summary)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&summary).wrap_err("Failed to serialize batch summary")?
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["memesim", "run", "--steps", "25", "--seed", "3"]);
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "info");
        match args.command {
            Commands::Run { steps, seed, until_idle, format, snapshot } => {
                assert_eq!(steps, 25);
                assert_eq!(seed, Some(3));
                assert!(!until_idle);
                assert_eq!(format, OutputFormat::Text);
                assert!(!snapshot);
            }
            _ => panic!("expected run subcommand"),
        }
    }

    #[test]
    fn test_batch_args() {
        let args = Args::parse_from([
            "memesim",
            "batch",
            "--runs",
            "4",
            "--base-seed",
            "100",
            "--format",
            "json",
            "--config",
            "sim.yaml",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("sim.yaml")));
        match args.command {
            Commands::Batch { runs, base_seed, steps, format } => {
                assert_eq!(runs, 4);
                assert_eq!(base_seed, 100);
                assert_eq!(steps, 100);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected batch subcommand"),
        }
    }

    #[test]
    fn test_load_applies_overrides() {
        let args = Args::parse_from(["memesim", "--num-nodes", "20", "run"]);
        let config = load(&args, Some(11)).unwrap();
        assert_eq!(config.num_nodes, 20);
        assert_eq!(config.seed, Some(11));
    }
}
