//! Diffusion engine: run lifecycle, random activation, and run counters.
//!
//! Construction builds the graph, the population, the influencers and the
//! initial A/B seeds from one seeded [`StdRng`]; every later draw comes from
//! the same generator, so a configuration plus a seed fully determines a
//! run.
//!
//! Each [`DiffusionEngine::step`] activates every node exactly once in a
//! freshly shuffled order. Activations run to completion one after another
//! and see each other's mutations immediately.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};

use crate::agent::{NodeParams, State, Track};
use crate::analysis::history::History;
use crate::analysis::metrics::{self, MetricsSnapshot};
use crate::config::{ActivationDelayMode, SimulationConfig, ValidationError};
use crate::model::Population;
use crate::topology::{generate_partition_graph, Graph};

/// Highest interested count seen for one track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Peak {
    count: usize,
    step: u64,
}

/// Drives the simulation over a fixed graph and population
#[derive(Debug, Clone)]
pub struct DiffusionEngine {
    config: SimulationConfig,
    seed: u64,
    rng: StdRng,
    graph: Graph,
    population: Population,
    mode: ActivationDelayMode,
    step_counter: u64,
    peaks: [Peak; 2],
    running: bool,
    history: History,
}

impl DiffusionEngine {
    /// Builds a run from `config`, generating the partition graph.
    ///
    /// Fails without partial construction when the configuration is invalid.
    pub fn new(config: SimulationConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        let seed = resolve_seed(&config);
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = generate_partition_graph(
            config.num_nodes,
            config.n_groups,
            config.p_in,
            config.p_out,
            &mut rng,
        );
        Ok(Self::populate(config, seed, rng, graph))
    }

    /// Builds a run over an explicit graph.
    ///
    /// `num_nodes` is taken from the graph; the community parameters of the
    /// configuration are ignored.
    pub fn with_graph(mut config: SimulationConfig, graph: Graph) -> Result<Self, ValidationError> {
        config.num_nodes = graph.num_vertices();
        config.validate()?;
        let seed = resolve_seed(&config);
        let rng = StdRng::seed_from_u64(seed);
        Ok(Self::populate(config, seed, rng, graph))
    }

    fn populate(config: SimulationConfig, seed: u64, mut rng: StdRng, graph: Graph) -> Self {
        let n = graph.num_vertices();

        let influencers = index::sample(&mut rng, n, config.influencer_appearance).into_vec();
        let mut population = Population::build(
            &graph,
            &NodeParams::from(&config),
            [config.interest_meme_a_chance, config.interest_meme_b_chance],
            &influencers,
            &mut rng,
        );

        let (size_a, size_b) = config.clamped_viral_sizes();
        for (track, size) in [(Track::A, size_a), (Track::B, size_b)] {
            for id in index::sample(&mut rng, n, size) {
                population.node_mut(id).seed(track);
            }
        }

        info!(
            "Initialized diffusion run: {} nodes, {} edges, {} groups, seed {}",
            n,
            graph.num_edges(),
            config.n_groups,
            seed
        );
        info!(
            "Influencers: {:?}; seeded {} nodes with meme A and {} with meme B",
            influencers, size_a, size_b
        );

        let mut history = History::new();
        history.push(MetricsSnapshot::collect(&population, 0));

        Self {
            mode: config.activation_delay_mode,
            config,
            seed,
            rng,
            graph,
            population,
            step_counter: 0,
            peaks: [Peak::default(); 2],
            running: true,
            history,
        }
    }

    /// Advances the run by one tick.
    ///
    /// Keeps advancing after `running` turned false; callers decide whether
    /// to stop.
    pub fn step(&mut self) {
        let mut order: Vec<usize> = self.graph.vertices().collect();
        order.shuffle(&mut self.rng);

        let mut infected = [0usize; 2];
        let mut bored = [0usize; 2];
        for id in order {
            let outcome = self.population.activate(&self.graph, id, self.mode, &mut self.rng);
            for track in Track::BOTH {
                let i = track.index();
                infected[i] += outcome.infected[i];
                bored[i] += usize::from(outcome.bored[i]);
            }
        }

        self.step_counter += 1;
        let snapshot = MetricsSnapshot::collect(&self.population, self.step_counter);

        for track in Track::BOTH {
            let count = snapshot.interested(track);
            let peak = &mut self.peaks[track.index()];
            if count > peak.count {
                *peak = Peak { count, step: self.step_counter };
                debug!("New peak for meme {}: {} at step {}", track, count, self.step_counter);
            }
        }

        debug!(
            "Step {}: A +{} interested, {} bored; B +{} interested, {} bored; {} active",
            self.step_counter,
            infected[0],
            bored[0],
            infected[1],
            bored[1],
            snapshot.active()
        );

        if snapshot.active() == 0 && self.running {
            self.running = false;
            info!(
                "No node is spreading any meme after step {} ({:.1}% of the population reached)",
                self.step_counter,
                snapshot.percentage_spread * 100.0
            );
        }

        self.history.push(snapshot);
    }

    /// Calls [`DiffusionEngine::step`] exactly `n` times
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed the random source was built from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn step_counter(&self) -> u64 {
        self.step_counter
    }

    /// False once a completed step left no node interested in either meme
    pub fn running(&self) -> bool {
        self.running
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Metrics of the latest recorded step
    pub fn latest(&self) -> MetricsSnapshot {
        self.history
            .latest()
            .copied()
            .unwrap_or_else(|| MetricsSnapshot::collect(&self.population, self.step_counter))
    }

    pub fn count(&self, state: State) -> usize {
        metrics::count(&self.population, state)
    }

    pub fn count_both(&self, first: State, second: State) -> usize {
        metrics::count_both(&self.population, first, second)
    }

    pub fn touched(&self) -> usize {
        metrics::touched(&self.population)
    }

    pub fn percentage_spread(&self) -> f64 {
        metrics::percentage_spread(&self.population)
    }

    pub fn percentage_meme(&self, track: Track) -> f64 {
        metrics::percentage_meme(&self.population, track)
    }

    pub fn percentage_meme_a(&self) -> f64 {
        self.percentage_meme(Track::A)
    }

    pub fn percentage_meme_b(&self) -> f64 {
        self.percentage_meme(Track::B)
    }

    pub fn bored_susceptible_ratio(&self) -> f64 {
        metrics::bored_susceptible_ratio(&self.population)
    }

    pub fn peak_interested(&self, track: Track) -> usize {
        self.peaks[track.index()].count
    }

    pub fn step_of_peak(&self, track: Track) -> u64 {
        self.peaks[track.index()].step
    }

    pub fn peak_interested_a(&self) -> usize {
        self.peak_interested(Track::A)
    }

    pub fn peak_interested_b(&self) -> usize {
        self.peak_interested(Track::B)
    }

    pub fn step_of_peak_a(&self) -> u64 {
        self.step_of_peak(Track::A)
    }

    pub fn step_of_peak_b(&self) -> u64 {
        self.step_of_peak(Track::B)
    }
}

fn resolve_seed(config: &SimulationConfig) -> u64 {
    match config.seed {
        Some(seed) => seed,
        None => {
            let seed: u64 = rand::thread_rng().gen();
            info!("No seed configured, using random seed {}", seed);
            seed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> SimulationConfig {
        SimulationConfig { seed: Some(seed), ..Default::default() }
    }

    #[test]
    fn test_construction() {
        let engine = DiffusionEngine::new(seeded(1)).unwrap();
        assert_eq!(engine.population().len(), 100);
        assert_eq!(engine.graph().num_vertices(), 100);
        assert_eq!(engine.step_counter(), 0);
        assert!(engine.running());
        assert_eq!(engine.seed(), 1);
        assert_eq!(engine.count(State::Influencer), 1);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.latest().step, 0);
        assert_eq!(engine.count(State::InterestedA), 5);
        assert_eq!(engine.count(State::InterestedB), 5);
        assert_eq!(engine.peak_interested_a(), 0);
        assert_eq!(engine.step_of_peak_a(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig { num_nodes: 3, influencer_appearance: 4, ..seeded(1) };
        assert!(matches!(
            DiffusionEngine::new(config),
            Err(ValidationError::TooManyInfluencers { .. })
        ));
    }

    #[test]
    fn test_with_graph_takes_size_from_graph() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        let config = SimulationConfig {
            initial_viral_size_a: 1,
            initial_viral_size_b: 0,
            ..seeded(2)
        };
        let engine = DiffusionEngine::with_graph(config, graph).unwrap();
        assert_eq!(engine.config().num_nodes, 3);
        assert_eq!(engine.count(State::InterestedA), 1);
        assert_eq!(engine.count(State::InterestedB), 0);
    }

    #[test]
    fn test_step_records_history_and_peaks() {
        let mut engine = DiffusionEngine::new(seeded(3)).unwrap();
        engine.run(10);
        assert_eq!(engine.step_counter(), 10);
        assert_eq!(engine.history().len(), 11);
        assert_eq!(engine.latest().step, 10);
        assert_eq!(
            (engine.peak_interested_a(), engine.step_of_peak_a()),
            engine.history().peak_after_start(Track::A)
        );
        assert_eq!(
            (engine.peak_interested_b(), engine.step_of_peak_b()),
            engine.history().peak_after_start(Track::B)
        );
    }

    #[test]
    fn test_random_seed_is_recorded() {
        let engine = DiffusionEngine::new(SimulationConfig::default()).unwrap();
        let replay = DiffusionEngine::new(seeded(engine.seed())).unwrap();
        assert_eq!(engine.population(), replay.population());
        assert_eq!(engine.graph(), replay.graph());
    }
}
