//! Strongly connected components via Kosaraju's algorithm.

use crate::graph::Graph;

/// Return the list of strongly connected components (each a vertex list).
/// Only the count is sent on the wire, but the full partition is useful for
/// tests and potential future callers.
pub fn strongly_connected_components(graph: &Graph) -> Vec<Vec<usize>> {
    let n = graph.vertices();

    // Pass 1: DFS on the original graph, push onto `order` in finish order.
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    for start in 0..n {
        if !visited[start] {
            fill_order(graph, start, &mut visited, &mut order);
        }
    }

    // Build the transpose adjacency.
    let mut transpose: Vec<Vec<usize>> = vec![Vec::new(); n];
    for u in 0..n {
        for &v in graph.neighbors(u).expect("u in range") {
            transpose[v].push(u);
        }
    }

    // Pass 2: DFS on the transpose in reverse finish order.
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    while let Some(v) = order.pop() {
        if !visited[v] {
            let mut component = Vec::new();
            collect_component(&transpose, v, &mut visited, &mut component);
            components.push(component);
        }
    }

    components
}

/// Convenience wrapper returning just the SCC count.
pub fn count(graph: &Graph) -> usize {
    strongly_connected_components(graph).len()
}

fn fill_order(graph: &Graph, v: usize, visited: &mut [bool], order: &mut Vec<usize>) {
    visited[v] = true;
    for &u in graph.neighbors(v).expect("v in range") {
        if !visited[u] {
            fill_order(graph, u, visited, order);
        }
    }
    order.push(v);
}

fn collect_component(transpose: &[Vec<usize>], v: usize, visited: &mut [bool], component: &mut Vec<usize>) {
    visited[v] = true;
    component.push(v);
    for &u in &transpose[v] {
        if !visited[u] {
            collect_component(transpose, u, visited, component);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_vertex_graph_has_two_sccs() {
        let mut g = Graph::new(7, true);
        for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0), (1, 3), (3, 4), (2, 5), (4, 5), (5, 6), (6, 4)] {
            g.add_edge(u, v, 1).unwrap();
        }
        assert_eq!(count(&g), 2);
    }

    #[test]
    fn no_edges_means_each_vertex_its_own_scc() {
        let g = Graph::new(4, true);
        assert_eq!(count(&g), 4);
    }

    #[test]
    fn single_cycle_is_one_scc() {
        let mut g = Graph::new(3, true);
        g.add_edge(0, 1, 1).unwrap();
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(2, 0, 1).unwrap();
        assert_eq!(count(&g), 1);
    }
}
