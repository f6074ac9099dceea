//! The unit of work that flows through the pipeline.

use std::collections::HashMap;
use std::net::TcpStream;

use crate::graph::Graph;

/// What kind of request a [`Job`] represents, and therefore which stages of
/// the pipeline it must pass through (see `crate::pipeline`'s routing
/// table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgKind {
    /// Only serialize the graph back to the client; no algorithm runs.
    Preview,
    /// Run all four kernels and aggregate the results.
    All,
    SingleMaxFlow,
    SingleScc,
    SingleMst,
    SingleCliques,
}

/// Recognized `PARAM` keys (`SRC`, `SINK`, `K`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Src,
    Sink,
    K,
}

/// The outcome of one kernel: either a numeric result or an error string,
/// kept separate so callers can format it either as `RESULT <n>` (single
/// algorithm) or `RESULT <NAME>=<n>` (the `ALL` body) without reparsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgOutcome {
    Value(i64),
    Error(String),
}

impl std::fmt::Display for AlgOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgOutcome::Value(v) => write!(f, "{v}"),
            AlgOutcome::Error(e) => write!(f, "{e}"),
        }
    }
}

impl AlgOutcome {
    /// Render as a standalone single-algorithm response body.
    pub fn as_single_body(&self) -> String {
        match self {
            AlgOutcome::Value(v) => format!("RESULT {v}"),
            AlgOutcome::Error(e) => e.clone(),
        }
    }
}

/// A request in flight through the pipeline.
///
/// Ownership model: exactly one stage owns a `Job` at any instant
/// (pop -> mutate -> push). The responding socket is a clone of the
/// connection's stream so the aggregator can write to it independently of
/// whatever the connection handler is doing with its own half.
pub struct Job {
    pub responder: TcpStream,
    pub kind: AlgKind,
    pub directed: bool,
    pub graph: Graph,
    pub params: HashMap<ParamKey, i64>,
    pub result_max_flow: Option<AlgOutcome>,
    pub result_scc: Option<AlgOutcome>,
    pub result_mst: Option<AlgOutcome>,
    pub result_cliques: Option<AlgOutcome>,
}

impl Job {
    pub fn new(responder: TcpStream, kind: AlgKind, directed: bool, graph: Graph, params: HashMap<ParamKey, i64>) -> Self {
        Self {
            responder,
            kind,
            directed,
            graph,
            params,
            result_max_flow: None,
            result_scc: None,
            result_mst: None,
            result_cliques: None,
        }
    }
}
