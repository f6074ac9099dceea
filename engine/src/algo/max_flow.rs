//! Maximum s-t flow via Edmonds-Karp (BFS-augmenting-path Ford-Fulkerson).

use std::collections::VecDeque;

use crate::algo::AlgoError;
use crate::graph::Graph;

/// Compute the maximum flow from `src` to `sink`.
///
/// Operates on a copy of the capacity matrix as a residual network; the
/// input graph itself is never mutated. Fails when `src` or `sink` is out of
/// range, or when `src == sink`.
pub fn max_flow(graph: &Graph, src: i64, sink: i64) -> Result<i64, AlgoError> {
    let n = graph.vertices();
    if src < 0 || sink < 0 || src as usize >= n || sink as usize >= n {
        return Err(AlgoError::EndpointOutOfRange);
    }
    if src == sink {
        return Err(AlgoError::SrcEqualsSink);
    }
    let (src, sink) = (src as usize, sink as usize);

    let mut residual: Vec<Vec<i64>> = graph.capacity_matrix().to_vec();
    let mut total = 0i64;

    loop {
        let mut parent = vec![usize::MAX; n];
        parent[src] = src;
        let mut queue = VecDeque::new();
        queue.push_back(src);

        while let Some(u) = queue.pop_front() {
            if u == sink {
                break;
            }
            for v in 0..n {
                if residual[u][v] > 0 && parent[v] == usize::MAX {
                    parent[v] = u;
                    queue.push_back(v);
                }
            }
        }

        if parent[sink] == usize::MAX {
            break; // no augmenting path
        }

        // Find bottleneck along the path.
        let mut bottleneck = i64::MAX;
        let mut v = sink;
        while v != src {
            let u = parent[v];
            bottleneck = bottleneck.min(residual[u][v]);
            v = u;
        }

        // Augment along the path.
        let mut v = sink;
        while v != src {
            let u = parent[v];
            residual[u][v] -= bottleneck;
            residual[v][u] += bottleneck;
            v = u;
        }

        total += bottleneck;
    }

    Ok(total)
}
