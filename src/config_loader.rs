use crate::config::SimulationConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<SimulationConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let content = fs::read_to_string(config_path)
        .wrap_err_with(|| format!("Failed to read configuration '{}'", config_path.display()))?;

    // An empty document means "all defaults"
    let config: SimulationConfig = if content.trim().is_empty() {
        SimulationConfig::default()
    } else {
        serde_yaml::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?
    };

    config.validate()?;

    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seed: Option<u64>,
    pub num_nodes: Option<usize>,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut SimulationConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(seed) = overrides.seed {
        info!("Overriding seed from command line: {}", seed);
        config.seed = Some(seed);
    }

    if let Some(num_nodes) = overrides.num_nodes {
        info!("Overriding num_nodes from command line: {}", num_nodes);
        config.num_nodes = num_nodes;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}
