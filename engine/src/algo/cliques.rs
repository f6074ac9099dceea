//! k-clique counting over an undirected graph.

use crate::algo::AlgoError;
use crate::graph::Graph;

/// Count unordered subsets of `k` vertices that form a clique.
///
/// Enumerates by extending partial cliques in increasing vertex order: a
/// candidate `v` extends the current clique only if `v` is greater than
/// every member already in it and adjacent to all of them.
///
/// Fails when `k < 2` or `k > V`.
pub fn count_k_cliques(graph: &Graph, k: i64) -> Result<usize, AlgoError> {
    let n = graph.vertices();
    if k < 2 || k as usize > n {
        return Err(AlgoError::InvalidK { k, max: n });
    }
    let k = k as usize;

    let adj = adjacency_matrix(graph);
    let mut count = 0usize;
    let mut clique = Vec::with_capacity(k);
    extend(&adj, n, k, 0, &mut clique, &mut count);
    Ok(count)
}

fn adjacency_matrix(graph: &Graph) -> Vec<Vec<bool>> {
    let n = graph.vertices();
    let cap = graph.capacity_matrix();
    let mut adj = vec![vec![false; n]; n];
    for u in 0..n {
        for v in 0..n {
            if cap[u][v] > 0 {
                adj[u][v] = true;
            }
        }
    }
    adj
}

fn extend(adj: &[Vec<bool>], n: usize, k: usize, start: usize, clique: &mut Vec<usize>, count: &mut usize) {
    if clique.len() == k {
        *count += 1;
        return;
    }
    for v in start..n {
        if clique.iter().all(|&m| adj[m][v]) {
            clique.push(v);
            extend(adj, n, k, v + 1, clique, count);
            clique.pop();
        }
    }
}
