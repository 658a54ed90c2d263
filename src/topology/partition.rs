//! Stochastic block model generation.
//!
//! Vertices are split into `n_groups` consecutive communities of
//! `num_nodes / n_groups` vertices each, with the integer remainder appended
//! to the last community. Every unordered pair is then joined independently
//! with probability `p_in` (same community) or `p_out` (different
//! communities).

use log::debug;
use rand::Rng;

use super::types::Graph;

/// Community sizes for `num_nodes` vertices split into `n_groups` groups.
///
/// Returns an empty vector when `n_groups` is zero.
pub fn partition_sizes(num_nodes: usize, n_groups: usize) -> Vec<usize> {
    if n_groups == 0 {
        return Vec::new();
    }
    let base = num_nodes / n_groups;
    let mut sizes = vec![base; n_groups];
    if let Some(last) = sizes.last_mut() {
        *last += num_nodes - base * n_groups;
    }
    sizes
}

/// Generates a random partition graph.
///
/// # Arguments
///
/// * `num_nodes` - Total number of vertices
/// * `n_groups` - Number of communities (must be at least 1 to produce any vertices)
/// * `p_in` - Edge probability inside a community
/// * `p_out` - Edge probability across communities
/// * `rng` - Seeded random source; pairs are visited in ascending `(u, v)`
///   order with one draw each, so the result is reproducible per seed
pub fn generate_partition_graph<R: Rng + ?Sized>(
    num_nodes: usize,
    n_groups: usize,
    p_in: f64,
    p_out: f64,
    rng: &mut R,
) -> Graph {
    let sizes = partition_sizes(num_nodes, n_groups);
    let groups: Vec<usize> = sizes
        .iter()
        .enumerate()
        .flat_map(|(group, &size)| std::iter::repeat(group).take(size))
        .collect();

    let mut graph = Graph::with_groups(groups);
    let n = graph.num_vertices();

    for u in 0..n {
        for v in (u + 1)..n {
            let p = if graph.group_of(u) == graph.group_of(v) { p_in } else { p_out };
            if rng.gen::<f64>() < p {
                graph.add_edge(u, v);
            }
        }
    }

    debug!(
        "Generated partition graph: {} vertices, {} edges, group sizes {:?}",
        n,
        graph.num_edges(),
        sizes
    );

    graph
}
