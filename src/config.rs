use serde::{Deserialize, Serialize};

/// How the activation delay of an interested node is consumed while it
/// tries to spread a meme.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivationDelayMode {
    /// Decrement once for every neighbor visited during a spread attempt
    #[default]
    PerNeighbor,
    /// Decrement once per spread attempt, regardless of neighbor count
    PerTick,
}

/// Simulation configuration that mirrors the YAML configuration.
///
/// Every key is optional; missing keys take the defaults below. Unknown keys
/// are rejected so that a misspelled parameter never silently falls back to
/// its default.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of nodes in the social graph
    pub num_nodes: usize,
    /// Number of equally-sized communities
    pub n_groups: usize,
    /// Edge probability between two nodes of the same community
    pub p_in: f64,
    /// Edge probability between two nodes of different communities
    pub p_out: f64,
    /// Nodes initially interested in meme A (clamped to `num_nodes`)
    #[serde(rename = "initial_viral_size_A", alias = "initial_viral_size_a")]
    pub initial_viral_size_a: usize,
    /// Nodes initially interested in meme B (clamped to `num_nodes`)
    #[serde(rename = "initial_viral_size_B", alias = "initial_viral_size_b")]
    pub initial_viral_size_b: usize,
    /// Base probability that an ordinary node spreads a meme to a neighbor
    pub meme_spread_chance: f64,
    /// Probability that an interested node becomes bored each step
    pub maybe_bored: f64,
    /// Number of influencer nodes
    pub influencer_appearance: usize,
    /// Base spread probability for influencer nodes
    pub influencer_spread_chance: f64,
    /// Probability that a node is predisposed towards meme A
    #[serde(rename = "interest_meme_A_chance", alias = "interest_meme_a_chance")]
    pub interest_meme_a_chance: f64,
    /// Probability that a node is predisposed towards meme B
    #[serde(rename = "interest_meme_B_chance", alias = "interest_meme_b_chance")]
    pub interest_meme_b_chance: f64,
    /// Spread discount applied when a node is predisposed towards the meme
    pub interest_discount: f64,
    /// Spread discount applied when a node is not predisposed towards the meme
    pub no_interest_discount: f64,
    /// Initial activation delay for both tracks
    pub activation_delay: u32,
    /// Lower bound (inclusive) of the initial boredom delay
    pub boredom_delay_min: u32,
    /// Upper bound (inclusive) of the initial boredom delay
    pub boredom_delay_max: u32,
    /// How the activation delay counts down
    pub activation_delay_mode: ActivationDelayMode,
    /// Seed for the random source; drawn from OS entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("num_nodes must be positive")]
    EmptyPopulation,
    #[error("n_groups must be at least 1")]
    NoGroups,
    #[error("{key} must be a probability in [0, 1], got {value}")]
    Probability { key: &'static str, value: f64 },
    #[error("influencer_appearance ({requested}) exceeds num_nodes ({num_nodes})")]
    TooManyInfluencers { requested: usize, num_nodes: usize },
    #[error("boredom_delay_min ({min}) is greater than boredom_delay_max ({max})")]
    BoredomDelayRange { min: u32, max: u32 },
}

impl SimulationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.num_nodes == 0 {
            return Err(ValidationError::EmptyPopulation);
        }
        if self.n_groups == 0 {
            return Err(ValidationError::NoGroups);
        }

        for (key, value) in self.probabilities() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::Probability { key, value });
            }
        }

        if self.influencer_appearance > self.num_nodes {
            return Err(ValidationError::TooManyInfluencers {
                requested: self.influencer_appearance,
                num_nodes: self.num_nodes,
            });
        }

        if self.boredom_delay_min > self.boredom_delay_max {
            return Err(ValidationError::BoredomDelayRange {
                min: self.boredom_delay_min,
                max: self.boredom_delay_max,
            });
        }

        Ok(())
    }

    /// Every probability-valued key with its current value
    fn probabilities(&self) -> [(&'static str, f64); 9] {
        [
            ("p_in", self.p_in),
            ("p_out", self.p_out),
            ("meme_spread_chance", self.meme_spread_chance),
            ("maybe_bored", self.maybe_bored),
            ("influencer_spread_chance", self.influencer_spread_chance),
            ("interest_meme_A_chance", self.interest_meme_a_chance),
            ("interest_meme_B_chance", self.interest_meme_b_chance),
            ("interest_discount", self.interest_discount),
            ("no_interest_discount", self.no_interest_discount),
        ]
    }

    /// Seed sizes after clamping to the population
    pub fn clamped_viral_sizes(&self) -> (usize, usize) {
        (
            self.initial_viral_size_a.min(self.num_nodes),
            self.initial_viral_size_b.min(self.num_nodes),
        )
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_nodes: 100,
            n_groups: 2,
            p_in: 0.4,
            p_out: 0.05,
            initial_viral_size_a: 5,
            initial_viral_size_b: 5,
            meme_spread_chance: 0.3,
            maybe_bored: 0.3,
            influencer_appearance: 1,
            influencer_spread_chance: 0.6,
            interest_meme_a_chance: 0.5,
            interest_meme_b_chance: 0.5,
            interest_discount: 0.95,
            no_interest_discount: 0.1,
            activation_delay: 1,
            boredom_delay_min: 2,
            boredom_delay_max: 3,
            activation_delay_mode: ActivationDelayMode::PerNeighbor,
            seed: None,
        }
    }
}
