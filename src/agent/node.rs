//! Simulated individual and its self-contained transitions.
//!
//! Each meme track follows `Susceptible -> Interested -> Bored`, where bored
//! is terminal. The two tracks live side by side on the same node. Spreading
//! touches neighbors and therefore lives in the population; everything that
//! only mutates the node itself is here.

use log::trace;
use rand::Rng;

use super::types::{State, StateSet, Track};
use crate::config::{ActivationDelayMode, SimulationConfig};

/// Per-node construction parameters shared by the whole population
#[derive(Debug, Clone, PartialEq)]
pub struct NodeParams {
    pub meme_spread_chance: f64,
    pub influencer_spread_chance: f64,
    pub maybe_bored: f64,
    pub interest_discount: f64,
    pub no_interest_discount: f64,
    pub activation_delay: u32,
    pub boredom_delay_min: u32,
    pub boredom_delay_max: u32,
}

impl From<&SimulationConfig> for NodeParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            meme_spread_chance: config.meme_spread_chance,
            influencer_spread_chance: config.influencer_spread_chance,
            maybe_bored: config.maybe_bored,
            interest_discount: config.interest_discount,
            no_interest_discount: config.no_interest_discount,
            activation_delay: config.activation_delay,
            boredom_delay_min: config.boredom_delay_min,
            boredom_delay_max: config.boredom_delay_max,
        }
    }
}

/// One simulated individual, bound to the graph vertex with the same id
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: usize,
    state: StateSet,
    spread_chance: [f64; 2],
    bored_chance: [f64; 2],
    activation_delay: [u32; 2],
    boredom_delay: [u32; 2],
}

impl Node {
    /// Creates a node from its initial tag set.
    ///
    /// Spread chances are fixed here from the `INFLUENCER` and `INTEREST_*`
    /// tags present in `initial_state`; tags added later do not change them.
    /// Draws one boredom delay per track from `rng`, A first.
    pub fn new<R: Rng + ?Sized>(
        id: usize,
        initial_state: StateSet,
        params: &NodeParams,
        rng: &mut R,
    ) -> Self {
        let base = if initial_state.contains(State::Influencer) {
            params.influencer_spread_chance
        } else {
            params.meme_spread_chance
        };
        let discount = |track: Track| {
            if initial_state.contains(track.interest()) {
                params.interest_discount
            } else {
                params.no_interest_discount
            }
        };

        let boredom_delay_a = rng.gen_range(params.boredom_delay_min..=params.boredom_delay_max);
        let boredom_delay_b = rng.gen_range(params.boredom_delay_min..=params.boredom_delay_max);

        Self {
            id,
            state: initial_state,
            spread_chance: [base * discount(Track::A), base * discount(Track::B)],
            bored_chance: [params.maybe_bored; 2],
            activation_delay: [params.activation_delay; 2],
            boredom_delay: [boredom_delay_a, boredom_delay_b],
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Graph vertex this node sits on
    pub fn pos(&self) -> usize {
        self.id
    }

    pub fn state(&self) -> &StateSet {
        &self.state
    }

    pub fn has(&self, state: State) -> bool {
        self.state.contains(state)
    }

    pub fn is_interested(&self, track: Track) -> bool {
        self.state.contains(track.interested())
    }

    pub fn is_bored(&self, track: Track) -> bool {
        self.state.contains(track.bored())
    }

    pub fn spread_chance(&self, track: Track) -> f64 {
        self.spread_chance[track.index()]
    }

    pub fn bored_chance(&self, track: Track) -> f64 {
        self.bored_chance[track.index()]
    }

    pub fn activation_delay(&self, track: Track) -> u32 {
        self.activation_delay[track.index()]
    }

    pub fn boredom_delay(&self, track: Track) -> u32 {
        self.boredom_delay[track.index()]
    }

    pub fn set_activation_delay(&mut self, track: Track, delay: u32) {
        self.activation_delay[track.index()] = delay;
    }

    pub fn set_boredom_delay(&mut self, track: Track, delay: u32) {
        self.boredom_delay[track.index()] = delay;
    }

    /// Infection by a neighbor: drops `SUSCEPTIBLE`, adds `INTERESTED_<track>`.
    ///
    /// Returns whether the node was not interested before.
    pub fn become_interested(&mut self, track: Track) -> bool {
        self.state.remove(State::Susceptible);
        self.state.insert(track.interested())
    }

    /// Initial seeding: like [`Node::become_interested`], and also adds the
    /// predisposition flag for the track.
    pub fn seed(&mut self, track: Track) {
        self.state.insert(track.interest());
        self.become_interested(track);
    }

    /// Counts the activation delay down by one, stopping at zero
    pub(crate) fn tick_activation_delay(&mut self, track: Track) {
        let delay = &mut self.activation_delay[track.index()];
        if *delay > 0 {
            *delay -= 1;
        }
    }

    /// Delay bookkeeping before a spread attempt.
    ///
    /// Per-tick mode consumes one unit here; per-neighbor mode consumes it
    /// inside the neighbor loop via [`Node::before_neighbor`].
    pub(crate) fn before_spread(&mut self, track: Track, mode: ActivationDelayMode) {
        if mode == ActivationDelayMode::PerTick {
            self.tick_activation_delay(track);
        }
    }

    pub(crate) fn before_neighbor(&mut self, track: Track, mode: ActivationDelayMode) {
        if mode == ActivationDelayMode::PerNeighbor {
            self.tick_activation_delay(track);
        }
    }

    /// One spread draw against a single neighbor.
    ///
    /// Always consumes exactly one random value, even while the activation
    /// delay is still running.
    pub(crate) fn spread_roll<R: Rng + ?Sized>(&self, track: Track, rng: &mut R) -> bool {
        let roll = rng.gen::<f64>();
        roll < self.spread_chance(track) && self.activation_delay(track) == 0
    }

    /// Boredom attempt for one track.
    ///
    /// Counts the boredom delay down, draws one random value, and moves the
    /// node from `INTERESTED_<track>` to the terminal `BORED_<track>` when
    /// the draw succeeds and the delay has run out. Returns whether the node
    /// became bored.
    pub fn try_be_bored<R: Rng + ?Sized>(&mut self, track: Track, rng: &mut R) -> bool {
        let delay = &mut self.boredom_delay[track.index()];
        if *delay > 0 {
            *delay -= 1;
        }

        let roll = rng.gen::<f64>();
        if roll < self.bored_chance(track) && self.boredom_delay(track) == 0 {
            self.state.remove(track.interested());
            self.state.insert(track.bored());
            trace!("node {} became bored of meme {}", self.id, track);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params() -> NodeParams {
        NodeParams::from(&SimulationConfig::default())
    }

    fn susceptible() -> StateSet {
        [State::Susceptible].into_iter().collect()
    }

    #[test]
    fn test_spread_chance_discounts() {
        let mut rng = StdRng::seed_from_u64(0);
        let state: StateSet = [State::Susceptible, State::InterestA].into_iter().collect();
        let node = Node::new(0, state, &params(), &mut rng);
        assert!((node.spread_chance(Track::A) - 0.3 * 0.95).abs() < 1e-12);
        assert!((node.spread_chance(Track::B) - 0.3 * 0.1).abs() < 1e-12);
        assert_eq!(node.bored_chance(Track::A), 0.3);
        assert_eq!(node.bored_chance(Track::B), 0.3);
    }

    #[test]
    fn test_influencer_uses_influencer_rate() {
        let mut rng = StdRng::seed_from_u64(0);
        let state: StateSet = [State::Susceptible, State::Influencer, State::InterestB]
            .into_iter()
            .collect();
        let node = Node::new(3, state, &params(), &mut rng);
        assert!((node.spread_chance(Track::A) - 0.6 * 0.1).abs() < 1e-12);
        assert!((node.spread_chance(Track::B) - 0.6 * 0.95).abs() < 1e-12);
        assert_eq!(node.id(), 3);
        assert_eq!(node.pos(), 3);
    }

    #[test]
    fn test_initial_delays() {
        let mut rng = StdRng::seed_from_u64(11);
        for id in 0..50 {
            let node = Node::new(id, susceptible(), &params(), &mut rng);
            assert_eq!(node.activation_delay(Track::A), 1);
            assert_eq!(node.activation_delay(Track::B), 1);
            for track in Track::BOTH {
                assert!((2..=3).contains(&node.boredom_delay(track)));
            }
        }
    }

    #[test]
    fn test_become_interested_clears_susceptible() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut node = Node::new(0, susceptible(), &params(), &mut rng);
        assert!(node.become_interested(Track::B));
        assert!(!node.become_interested(Track::B));
        assert!(!node.has(State::Susceptible));
        assert!(node.is_interested(Track::B));
        assert!(!node.has(State::InterestB));
        assert!(node.state().is_consistent());
    }

    #[test]
    fn test_seed_adds_predisposition() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut node = Node::new(0, susceptible(), &params(), &mut rng);
        let before = node.spread_chance(Track::A);
        node.seed(Track::A);
        assert!(node.has(State::InterestA));
        assert!(node.is_interested(Track::A));
        assert_eq!(node.spread_chance(Track::A), before);
    }

    #[test]
    fn test_boredom_waits_for_delay() {
        let mut rng = StdRng::seed_from_u64(0);
        let p = NodeParams { maybe_bored: 1.0, ..params() };
        let mut node = Node::new(0, susceptible(), &p, &mut rng);
        node.seed(Track::A);
        node.set_boredom_delay(Track::A, 2);

        assert!(!node.try_be_bored(Track::A, &mut rng));
        assert_eq!(node.boredom_delay(Track::A), 1);
        assert!(node.try_be_bored(Track::A, &mut rng));
        assert!(node.is_bored(Track::A));
        assert!(!node.is_interested(Track::A));
        assert!(!node.has(State::Susceptible));
    }

    #[test]
    fn test_never_bored_with_zero_chance() {
        let mut rng = StdRng::seed_from_u64(5);
        let p = NodeParams { maybe_bored: 0.0, ..params() };
        let mut node = Node::new(0, susceptible(), &p, &mut rng);
        node.seed(Track::B);
        for _ in 0..20 {
            assert!(!node.try_be_bored(Track::B, &mut rng));
        }
        assert_eq!(node.boredom_delay(Track::B), 0);
        assert!(node.is_interested(Track::B));
    }

    #[test]
    fn test_activation_delay_modes() {
        let mut rng = StdRng::seed_from_u64(0);
        let p = NodeParams { activation_delay: 2, ..params() };
        let mut node = Node::new(0, susceptible(), &p, &mut rng);

        node.before_spread(Track::A, ActivationDelayMode::PerNeighbor);
        assert_eq!(node.activation_delay(Track::A), 2);
        node.before_neighbor(Track::A, ActivationDelayMode::PerNeighbor);
        assert_eq!(node.activation_delay(Track::A), 1);

        node.before_neighbor(Track::B, ActivationDelayMode::PerTick);
        assert_eq!(node.activation_delay(Track::B), 2);
        node.before_spread(Track::B, ActivationDelayMode::PerTick);
        assert_eq!(node.activation_delay(Track::B), 1);

        for _ in 0..5 {
            node.tick_activation_delay(Track::A);
        }
        assert_eq!(node.activation_delay(Track::A), 0);
    }

    #[test]
    fn test_spread_roll_blocked_by_delay() {
        let mut rng = StdRng::seed_from_u64(0);
        let p = NodeParams {
            meme_spread_chance: 1.0,
            interest_discount: 1.0,
            no_interest_discount: 1.0,
            ..params()
        };
        let mut node = Node::new(0, susceptible(), &p, &mut rng);
        assert!(!node.spread_roll(Track::A, &mut rng));
        node.set_activation_delay(Track::A, 0);
        assert!(node.spread_roll(Track::A, &mut rng));
    }
}
