//! k-clique counting kernel, including the S4 scenario from spec.md §8.

use graph_service_engine::algo::cliques::count_k_cliques;
use graph_service_engine::algo::AlgoError;
use graph_service_engine::graph::Graph;

fn dense_square() -> Graph {
    let mut g = Graph::new(4, false);
    for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)] {
        g.add_edge(u, v, 1).unwrap();
    }
    g
}

#[test]
fn s4_dense_square_has_two_triangles() {
    assert_eq!(count_k_cliques(&dense_square(), 3).unwrap(), 2);
}

#[test]
fn k_of_two_equals_edge_count() {
    assert_eq!(count_k_cliques(&dense_square(), 2).unwrap(), dense_square().edges() as usize);
}

#[test]
fn empty_graph_has_no_cliques_of_size_three() {
    let g = Graph::new(4, false);
    assert_eq!(count_k_cliques(&g, 3).unwrap(), 0);
}

#[test]
fn k_below_two_is_rejected() {
    assert_eq!(count_k_cliques(&dense_square(), 0).unwrap_err(), AlgoError::InvalidK { k: 0, max: 4 });
    assert_eq!(count_k_cliques(&dense_square(), 1).unwrap_err(), AlgoError::InvalidK { k: 1, max: 4 });
}

#[test]
fn k_above_vertex_count_is_rejected() {
    assert_eq!(count_k_cliques(&dense_square(), 5).unwrap_err(), AlgoError::InvalidK { k: 5, max: 4 });
}

#[test]
fn complete_graph_on_six_vertices_has_one_six_clique() {
    let mut g = Graph::new(6, false);
    for u in 0..6 {
        for v in (u + 1)..6 {
            g.add_edge(u, v, 1).unwrap();
        }
    }
    assert_eq!(count_k_cliques(&g, 6).unwrap(), 1);
    assert_eq!(count_k_cliques(&g, 3).unwrap(), 20); // C(6,3)
}
