//! Node arena bound one-to-one to graph vertices.
//!
//! Node `i` always sits on vertex `i`. The graph is passed in by reference
//! for every neighbor query, so the population never owns or cycles back
//! into the topology.

use log::trace;
use rand::Rng;

use crate::agent::{Node, NodeParams, State, StateSet, Track};
use crate::config::ActivationDelayMode;
use crate::topology::Graph;

/// What happened during one node activation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationOutcome {
    /// Neighbors newly interested, per track
    pub infected: [usize; 2],
    /// Whether the node became bored, per track
    pub bored: [bool; 2],
}

/// Ordered collection of nodes, indexed by vertex id
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    nodes: Vec<Node>,
}

impl Population {
    /// Builds one node per vertex.
    ///
    /// For each vertex in order, draws the A then B predisposition flags and
    /// then lets the node draw its own boredom delays. Vertices listed in
    /// `influencers` start with the `INFLUENCER` tag.
    pub fn build<R: Rng + ?Sized>(
        graph: &Graph,
        params: &NodeParams,
        interest_chances: [f64; 2],
        influencers: &[usize],
        rng: &mut R,
    ) -> Self {
        let mut is_influencer = vec![false; graph.num_vertices()];
        for &v in influencers {
            is_influencer[v] = true;
        }

        let nodes = graph
            .vertices()
            .map(|v| {
                let mut state = StateSet::new();
                state.insert(State::Susceptible);
                for track in Track::BOTH {
                    if rng.gen::<f64>() < interest_chances[track.index()] {
                        state.insert(track.interest());
                    }
                }
                if is_influencer[v] {
                    state.insert(State::Influencer);
                }
                Node::new(v, state, params, rng)
            })
            .collect();

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: usize) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Nodes on the open neighborhood of `id`
    pub fn neighbors<'a>(&'a self, graph: &'a Graph, id: usize) -> impl Iterator<Item = &'a Node> + 'a {
        graph.neighbors(id).iter().map(move |&n| &self.nodes[n])
    }

    /// Number of neighbors of `id` holding `state`
    pub fn count_neighbors_with(&self, graph: &Graph, id: usize, state: State) -> usize {
        self.neighbors(graph, id).filter(|n| n.has(state)).count()
    }

    /// Neighbors that still take part in propagation: anyone bored of
    /// either meme is excluded for both memes.
    pub fn spread_candidates(&self, graph: &Graph, id: usize) -> Vec<usize> {
        graph
            .neighbors(id)
            .iter()
            .copied()
            .filter(|&n| !self.nodes[n].state().is_bored_any())
            .collect()
    }

    /// Spread attempt of node `id` on `track`.
    ///
    /// Visits the spread candidates in ascending id order, drawing one random
    /// value per candidate. A successful draw only infects while the node's
    /// activation delay is zero. Returns the number of neighbors that were
    /// not interested before.
    pub fn try_to_spread<R: Rng + ?Sized>(
        &mut self,
        graph: &Graph,
        id: usize,
        track: Track,
        mode: ActivationDelayMode,
        rng: &mut R,
    ) -> usize {
        let candidates = self.spread_candidates(graph, id);
        self.nodes[id].before_spread(track, mode);

        let mut infected = 0;
        for n in candidates {
            let source = &mut self.nodes[id];
            source.before_neighbor(track, mode);
            if source.spread_roll(track, rng) && self.nodes[n].become_interested(track) {
                trace!("node {} spread meme {} to node {}", id, track, n);
                infected += 1;
            }
        }
        infected
    }

    /// Runs one activation of node `id`: for each track it is interested
    /// in (A first), a spread attempt followed by a boredom attempt.
    pub fn activate<R: Rng + ?Sized>(
        &mut self,
        graph: &Graph,
        id: usize,
        mode: ActivationDelayMode,
        rng: &mut R,
    ) -> ActivationOutcome {
        let mut outcome = ActivationOutcome::default();
        for track in Track::BOTH {
            if self.nodes[id].is_interested(track) {
                outcome.infected[track.index()] = self.try_to_spread(graph, id, track, mode, rng);
                outcome.bored[track.index()] = self.nodes[id].try_be_bored(track, rng);
            }
        }
        outcome
    }
}
