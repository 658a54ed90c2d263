//! Graph type definitions.
//!
//! The graph is an adjacency arena indexed by vertex id. It is built once
//! and never mutated afterwards; node state lives in a parallel arena owned
//! by the population.

use serde::Serialize;

/// Undirected graph with community labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    /// Sorted neighbor ids per vertex
    adjacency: Vec<Vec<usize>>,
    /// Community index per vertex
    groups: Vec<usize>,
}

impl Graph {
    /// Creates a graph with `num_vertices` isolated vertices, all in group 0
    pub fn empty(num_vertices: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_vertices],
            groups: vec![0; num_vertices],
        }
    }

    /// Builds a graph from an explicit edge list.
    ///
    /// Self-loops and duplicate edges are ignored. Edges referencing a vertex
    /// outside `0..num_vertices` are ignored as well.
    pub fn from_edges(num_vertices: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::empty(num_vertices);
        for &(u, v) in edges {
            if u < num_vertices && v < num_vertices {
                graph.add_edge(u, v);
            }
        }
        graph
    }

    pub(crate) fn with_groups(groups: Vec<usize>) -> Self {
        Self {
            adjacency: vec![Vec::new(); groups.len()],
            groups,
        }
    }

    pub(crate) fn add_edge(&mut self, u: usize, v: usize) {
        if u == v {
            return;
        }
        if let Err(pos) = self.adjacency[u].binary_search(&v) {
            self.adjacency[u].insert(pos, v);
        }
        if let Err(pos) = self.adjacency[v].binary_search(&u) {
            self.adjacency[v].insert(pos, u);
        }
    }

    /// Number of vertices
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges
    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Enumerates all vertex ids
    pub fn vertices(&self) -> std::ops::Range<usize> {
        0..self.adjacency.len()
    }

    /// Open neighborhood of `vertex` (never includes the vertex itself)
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    /// Degree of `vertex`
    pub fn degree(&self, vertex: usize) -> usize {
        self.adjacency[vertex].len()
    }

    /// Community index of `vertex`
    pub fn group_of(&self, vertex: usize) -> usize {
        self.groups[vertex]
    }

    /// Whether `u` and `v` are adjacent
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency
            .get(u)
            .map_or(false, |n| n.binary_search(&v).is_ok())
    }

    /// Static edge list with `u < v`, in ascending order
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |&&v| u < v)
                    .map(move |&v| (u, v))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_ignores_loops_and_duplicates() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 0), (2, 2), (1, 2), (0, 9)]);
        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert!(graph.neighbors(2).iter().all(|&n| n != 2));
        assert_eq!(graph.edges(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_has_edge_is_symmetric() {
        let graph = Graph::from_edges(4, &[(3, 0)]);
        assert!(graph.has_edge(0, 3));
        assert!(graph.has_edge(3, 0));
        assert!(!graph.has_edge(0, 1));
        assert!(!graph.has_edge(7, 0));
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 0);
    }
}
