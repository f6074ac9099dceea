//! Minimum spanning tree (forest) weight via Kruskal's algorithm.

use crate::graph::Graph;

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Returns `true` if `a` and `b` were in different components (and are
    /// now joined).
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

/// Sum of weights in a minimum spanning forest of an undirected graph.
///
/// When the graph is disconnected this is the weight of the minimum
/// spanning *forest* (sum over the accepted edges), not an error — see the
/// open question this preserves from the source system.
pub fn mst_weight(graph: &Graph) -> i64 {
    let n = graph.vertices();
    let cap = graph.capacity_matrix();

    // Each undirected edge appears twice in the dense matrix; collect each
    // once by only looking at u < v.
    let mut edges: Vec<(i64, usize, usize)> = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if cap[u][v] > 0 {
                edges.push((cap[u][v], u, v));
            }
        }
    }
    edges.sort_by_key(|&(w, _, _)| w);

    let mut uf = UnionFind::new(n);
    let mut total = 0i64;
    for (w, u, v) in edges {
        if uf.union(u, v) {
            total += w;
        }
    }
    total
}
