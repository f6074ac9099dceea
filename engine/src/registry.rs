//! Strategy registry: maps an algorithm identifier to the adapter that runs
//! it and produces a typed outcome.
//!
//! Each adapter reads only the parameter keys it needs (`SRC`/`SINK` for
//! `MAX_FLOW`, `K` for `CLIQUES`) and is responsible for the
//! directed/undirected precondition check — the one piece of dispatch logic
//! shared by all four algorithms.

use std::collections::HashMap;

use crate::algo::{cliques, max_flow, mst, scc};
use crate::graph::Graph;
use crate::job::{AlgOutcome, ParamKey};

const DEFAULT_K: i64 = 3;

/// Run the algorithm named `alg` (already uppercased) against `graph`.
///
/// Returns `None` for an unrecognized identifier (the "nil" case in
/// spec.md); otherwise `Some(outcome)`.
pub fn run(alg: &str, graph: &Graph, directed: bool, params: &HashMap<ParamKey, i64>) -> Option<AlgOutcome> {
    match alg {
        "MAX_FLOW" => Some(run_max_flow(graph, directed, params)),
        "SCC" => Some(run_scc(graph, directed)),
        "MST" => Some(run_mst(graph, directed)),
        "CLIQUES" => Some(run_cliques(graph, directed, params)),
        _ => None,
    }
}

fn directedness_error(alg: &str, directed: bool) -> AlgOutcome {
    AlgOutcome::Error(format!(
        "Error: cannot run {} on {} graph",
        alg,
        if directed { "directed" } else { "undirected" }
    ))
}

/// Per-algorithm adapters, exposed directly to the pipeline stages so they
/// don't have to re-derive the directedness check and default-param lookup
/// that [`run`] already encodes.
pub(crate) fn run_max_flow(graph: &Graph, directed: bool, params: &HashMap<ParamKey, i64>) -> AlgOutcome {
    if !directed {
        return directedness_error("MAX_FLOW", directed);
    }
    let src = params.get(&ParamKey::Src).copied().unwrap_or(0);
    let sink = params.get(&ParamKey::Sink).copied().unwrap_or(graph.vertices() as i64 - 1);
    match max_flow::max_flow(graph, src, sink) {
        Ok(v) => AlgOutcome::Value(v),
        Err(e) => AlgOutcome::Error(format!("Error: {e}")),
    }
}

pub(crate) fn run_scc(graph: &Graph, directed: bool) -> AlgOutcome {
    if !directed {
        return directedness_error("SCC", directed);
    }
    AlgOutcome::Value(scc::count(graph) as i64)
}

pub(crate) fn run_mst(graph: &Graph, directed: bool) -> AlgOutcome {
    if directed {
        return directedness_error("MST", directed);
    }
    AlgOutcome::Value(mst::mst_weight(graph))
}

pub(crate) fn run_cliques(graph: &Graph, directed: bool, params: &HashMap<ParamKey, i64>) -> AlgOutcome {
    if directed {
        return directedness_error("CLIQUES", directed);
    }
    let k = params.get(&ParamKey::K).copied().unwrap_or(DEFAULT_K);
    match cliques::count_k_cliques(graph, k) {
        Ok(v) => AlgOutcome::Value(v as i64),
        Err(e) => AlgOutcome::Error(format!("Error: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_diagonal() -> Graph {
        let mut g = Graph::new(4, false);
        g.add_edge(0, 1, 2).unwrap();
        g.add_edge(1, 2, 3).unwrap();
        g.add_edge(2, 3, 3).unwrap();
        g.add_edge(3, 0, 5).unwrap();
        g.add_edge(0, 2, 6).unwrap();
        g
    }

    #[test]
    fn unknown_identifier_returns_none() {
        assert!(run("BOGUS", &square_with_diagonal(), false, &HashMap::new()).is_none());
    }

    #[test]
    fn mst_on_undirected_graph_succeeds() {
        assert_eq!(
            run("MST", &square_with_diagonal(), false, &HashMap::new()),
            Some(AlgOutcome::Value(8))
        );
    }

    #[test]
    fn scc_on_undirected_graph_is_a_directedness_error() {
        assert_eq!(
            run("SCC", &square_with_diagonal(), false, &HashMap::new()),
            Some(AlgOutcome::Error("Error: cannot run SCC on undirected graph".to_string()))
        );
    }

    #[test]
    fn max_flow_on_undirected_graph_is_a_directedness_error() {
        assert_eq!(
            run("MAX_FLOW", &square_with_diagonal(), false, &HashMap::new()),
            Some(AlgOutcome::Error("Error: cannot run MAX_FLOW on undirected graph".to_string()))
        );
    }

    #[test]
    fn cliques_on_directed_graph_is_a_directedness_error() {
        let mut g = Graph::new(4, true);
        g.add_edge(0, 1, 1).unwrap();
        assert_eq!(
            run("CLIQUES", &g, true, &HashMap::new()),
            Some(AlgOutcome::Error("Error: cannot run CLIQUES on directed graph".to_string()))
        );
    }

    #[test]
    fn cliques_default_k_is_three() {
        assert_eq!(
            run("CLIQUES", &square_with_diagonal(), false, &HashMap::new()),
            Some(AlgOutcome::Value(2))
        );
    }

    #[test]
    fn single_body_formatting() {
        assert_eq!(AlgOutcome::Value(5).as_single_body(), "RESULT 5");
        assert_eq!(
            AlgOutcome::Error("Error: boom".to_string()).as_single_body(),
            "Error: boom"
        );
    }
}
