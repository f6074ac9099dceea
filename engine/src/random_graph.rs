//! Deterministic pseudo-random simple-graph generator.
//!
//! Given `(vertices, edges, seed, directed, wmin, wmax)`, produces a simple
//! graph (no self-loops, no duplicate edges) with exactly `edges` edges, each
//! weight drawn uniformly from `[wmin, wmax]`. Identical inputs always
//! produce an identical graph — this is the only contract the rest of the
//! system relies on; the PRNG choice itself is an implementation detail.

use std::collections::HashSet;

use crate::graph::Graph;
use crate::rng::Rng;

/// Generate a deterministic simple graph.
///
/// `wmin` is clamped to at least 1; if `wmin > wmax` the two are swapped.
/// `edges` is clamped to the maximum number of simple edges the graph can
/// hold (`V*(V-1)` directed, `V*(V-1)/2` undirected) so this function never
/// loops forever looking for edges that cannot exist.
pub fn generate(vertices: usize, edges: usize, seed: i64, directed: bool, wmin: i64, wmax: i64) -> Graph {
    let wmin = wmin.max(1);
    let (wmin, wmax) = if wmin > wmax { (wmax.max(1), wmin) } else { (wmin, wmax) };

    let max_edges = if directed {
        vertices.saturating_mul(vertices.saturating_sub(1))
    } else {
        vertices.saturating_mul(vertices.saturating_sub(1)) / 2
    };
    let edges = edges.min(max_edges);

    let mut graph = Graph::new(vertices, directed);
    if vertices < 2 {
        return graph;
    }

    let mut rng = Rng::new(seed);
    let mut used: HashSet<(usize, usize)> = HashSet::with_capacity(edges);
    let mut added = 0usize;

    while added < edges {
        let u = rng.range(0, vertices as i64) as usize;
        let v = rng.range(0, vertices as i64) as usize;
        if u == v {
            continue;
        }
        let key = if directed { (u, v) } else { (u.min(v), u.max(v)) };
        if used.contains(&key) {
            continue;
        }
        let weight = rng.range(wmin, wmax + 1);
        graph.add_edge(u as i64, v as i64, weight).expect("bounds checked above");
        used.insert(key);
        added += 1;
    }

    graph
}
