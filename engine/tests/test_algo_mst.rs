//! Kruskal MST(-forest) weight kernel, including the S1 scenario from
//! spec.md §8 and the resolved "disconnected graph" open question.

use graph_service_engine::algo::mst::mst_weight;
use graph_service_engine::graph::Graph;

#[test]
fn s1_square_with_diagonal_mst_is_eight() {
    let mut g = Graph::new(4, false);
    g.add_edge(0, 1, 2).unwrap();
    g.add_edge(1, 2, 3).unwrap();
    g.add_edge(2, 3, 3).unwrap();
    g.add_edge(3, 0, 5).unwrap();
    g.add_edge(0, 2, 6).unwrap();
    assert_eq!(mst_weight(&g), 8);
}

#[test]
fn disconnected_graph_returns_spanning_forest_weight_not_an_error() {
    let mut g = Graph::new(5, false);
    g.add_edge(0, 1, 3).unwrap();
    g.add_edge(1, 2, 4).unwrap();
    g.add_edge(3, 4, 2).unwrap();
    assert_eq!(mst_weight(&g), 9);
}

#[test]
fn single_vertex_graph_has_zero_weight() {
    let g = Graph::new(1, false);
    assert_eq!(mst_weight(&g), 0);
}

#[test]
fn parallel_paths_pick_the_cheaper_edges() {
    let mut g = Graph::new(3, false);
    g.add_edge(0, 1, 10).unwrap();
    g.add_edge(1, 2, 10).unwrap();
    g.add_edge(0, 2, 1).unwrap();
    assert_eq!(mst_weight(&g), 11); // (0,2)=1 + min(0,1 / 1,2)=10
}

#[test]
fn complete_graph_of_equal_weights_uses_exactly_v_minus_one_edges() {
    let mut g = Graph::new(5, false);
    for u in 0..5 {
        for v in (u + 1)..5 {
            g.add_edge(u, v, 1).unwrap();
        }
    }
    assert_eq!(mst_weight(&g), 4);
}
