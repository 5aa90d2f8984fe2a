//! Seeded random graphs, mostly for tests and benchmarks.

use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

use super::{max_edges, Graph};

/// `density` as a probability: clamped to `[0, 1]`, NaN draws nothing.
fn edge_probability(density: f64) -> f64 {
    if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    }
}

impl Graph {
    /// Unweighted graph where each admissible edge is present with
    /// probability `density` (clamped to `[0, 1]`, NaN meaning 0).
    ///
    /// If every edge gets drawn the result is flagged complete.
    pub fn random(vertex_count: usize, is_directed: bool, density: f64, seed: u64) -> Self {
        let density = edge_probability(density);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut g = Graph::new(vertex_count, is_directed, false);

        for v in 0..vertex_count {
            let first = if is_directed { 0 } else { v + 1 };
            for w in (first..vertex_count).filter(|&w| w != v) {
                if rng.gen_bool(density) {
                    // distinct, in range, and never drawn twice
                    let _ = g.add_edge(v, w);
                }
            }
        }

        g.complete = vertex_count > 1 && g.n_edges == max_edges(vertex_count, is_directed);
        g
    }

    /// Directed acyclic graph: vertices are shuffled into a hidden order and
    /// each forward pair of that order is joined with probability `density`.
    pub fn random_dag(vertex_count: usize, density: f64, seed: u64) -> Self {
        let density = edge_probability(density);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..vertex_count).collect();
        order.shuffle(&mut rng);

        let mut g = Graph::new(vertex_count, true, false);
        for (i, &v) in order.iter().enumerate() {
            for &w in &order[i + 1..] {
                if rng.gen_bool(density) {
                    let _ = g.add_edge(v, w);
                }
            }
        }
        g
    }
}
