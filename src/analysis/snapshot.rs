//! Serializable view of the network for external renderers.
//!
//! A renderer needs the id, community and tag set of every node after each
//! step, plus the static edge list.

use serde::Serialize;

use crate::agent::StateSet;
use crate::model::DiffusionEngine;

/// One node as seen by a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub id: usize,
    pub group: usize,
    pub degree: usize,
    pub states: StateSet,
}

/// Full network state at one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSnapshot {
    pub step: u64,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<(usize, usize)>,
}

impl NetworkSnapshot {
    pub fn capture(engine: &DiffusionEngine) -> Self {
        let graph = engine.graph();
        let nodes = engine
            .population()
            .iter()
            .map(|node| NodeView {
                id: node.id(),
                group: graph.group_of(node.pos()),
                degree: graph.degree(node.pos()),
                states: *node.state(),
            })
            .collect();

        Self {
            step: engine.step_counter(),
            nodes,
            edges: graph.edges(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::State;
    use crate::config::SimulationConfig;
    use crate::topology::Graph;

    #[test]
    fn test_capture_matches_engine() {
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let config = SimulationConfig {
            influencer_appearance: 0,
            initial_viral_size_a: 4,
            initial_viral_size_b: 0,
            seed: Some(5),
            ..Default::default()
        };
        let engine = DiffusionEngine::with_graph(config, graph).unwrap();
        let snapshot = NetworkSnapshot::capture(&engine);

        assert_eq!(snapshot.step, 0);
        assert_eq!(snapshot.edges, vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(snapshot.nodes.len(), 4);
        assert_eq!(snapshot.nodes[1].degree, 2);
        assert!(snapshot.nodes.iter().all(|n| n.states.contains(State::InterestedA)));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["edges"][0], serde_json::json!([0, 1]));
        let states = json["nodes"][0]["states"].as_array().unwrap();
        assert!(states.contains(&serde_json::json!("INTERESTED_A")));
        assert!(states.contains(&serde_json::json!("INTEREST_A")));
    }
}
