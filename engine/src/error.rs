//! Crate-wide error types
//!
//! Each module that has a fallible boundary gets its own `thiserror`-derived
//! enum; `EngineError` aggregates them for callers that cross more than one
//! boundary (the connection handler, mainly).

use thiserror::Error;

/// Errors raised while building or querying a [`crate::graph::Graph`].
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GraphError {
    #[error("vertex {0} out of range for graph of size {1}")]
    VertexOutOfRange(i64, usize),
    #[error("negative capacity {0} on edge")]
    NegativeCapacity(i64),
}

/// Errors raised while parsing or validating an inbound request frame.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ProtocolError {
    #[error("Unknown directive: {0}")]
    UnknownDirective(String),
    #[error("Malformed operand: {0}")]
    MalformedOperand(String),
    #[error("Missing/invalid V")]
    MissingOrInvalidV,
    #[error("Missing/invalid E")]
    MissingOrInvalidE,
    #[error("EDGE endpoint out of range: {0} {1}")]
    EdgeOutOfRange(i64, i64),
    #[error("edge weight must be >= 1, got {0}")]
    InvalidWeight(i64),
    #[error("SINK must differ from SRC")]
    SinkEqualsSrc,
    #[error("Unsupported algorithm")]
    UnsupportedAlgorithm,
}

/// Errors raised only at server startup; all are fatal (process exits 1).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to create socket: {0}")]
    Socket(#[source] std::io::Error),
    #[error("failed to bind: {0}")]
    Bind(#[source] std::io::Error),
    #[error("failed to listen: {0}")]
    Listen(#[source] std::io::Error),
}

/// Aggregate error for boundaries that can fail for more than one reason.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("Exception: {0}")]
    Unexpected(String),
}
