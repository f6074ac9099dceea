//! The four algorithm kernels: maximum flow, strongly connected components,
//! minimum spanning tree weight, and k-clique count.
//!
//! All four are read-only with respect to their input except max-flow, which
//! operates on a mutable copy of the capacity matrix as residuals.

pub mod cliques;
pub mod max_flow;
pub mod mst;
pub mod scc;

use thiserror::Error;

/// Errors a kernel can raise about its own parameters. These never escape
/// the [`crate::registry`] boundary as a Rust `Result` — they are formatted
/// into the wire's `Error: …` string by the adapter that calls the kernel.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AlgoError {
    #[error("SRC or SINK out of range")]
    EndpointOutOfRange,
    #[error("SRC and SINK must differ")]
    SrcEqualsSink,
    #[error("K must be between 2 and {max}, got {k}")]
    InvalidK { k: i64, max: usize },
}
